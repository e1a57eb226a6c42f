//! # Loans Module
//!
//! Borrowed amounts repaid in installments. The next unpaid installment of
//! each loan feeds the upcoming-payments view.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::Loan;
pub use routes::loans_routes;
pub use services::LoansService;
