//! # Payments Module
//!
//! Merges subscription and loan records into the unified upcoming-payments
//! view shown on the dashboard. The aggregation itself is a pure function;
//! the handler supplies freshly fetched records and the current instant.

pub mod aggregator;
pub mod handlers;
pub mod models;
pub mod routes;

pub use aggregator::build_upcoming_payments;
pub use models::UpcomingPayment;
pub use routes::payments_routes;
