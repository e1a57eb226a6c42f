//! # Dashboard Module
//!
//! Server-side KPI figures for the dashboard header. Chart rendering is a
//! client concern; this module only serves the numbers.

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::dashboard_routes;
