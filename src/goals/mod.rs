//! # Goals Module
//!
//! Savings targets with progress tracking.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::Goal;
pub use routes::goals_routes;
pub use services::GoalsService;
