//! # Subscriptions Module
//!
//! Recurring charges the user tracks (streaming, utilities, memberships).
//! Unpaid subscriptions with future due dates feed the upcoming-payments view.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;

#[cfg(test)]
mod tests;

pub use models::Subscription;
pub use routes::subscriptions_routes;
pub use services::SubscriptionsService;
