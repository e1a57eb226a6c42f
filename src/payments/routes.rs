//! Upcoming-payments routes

use axum::{routing::get, Router};

use super::handlers;

pub fn payments_routes() -> Router {
    Router::new().route(
        "/api/payments/upcoming",
        get(handlers::get_upcoming_payments),
    )
}
