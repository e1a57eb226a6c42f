//! # Budgets Module
//!
//! Monthly spending limits per category.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use models::Budget;
pub use routes::budgets_routes;
pub use services::BudgetsService;
