//! Budget routes

use axum::{routing::get, routing::put, Router};

use super::handlers;

pub fn budgets_routes() -> Router {
    Router::new()
        .route(
            "/api/budgets",
            get(handlers::get_budgets).post(handlers::create_budget),
        )
        .route(
            "/api/budgets/:id",
            put(handlers::update_budget).delete(handlers::delete_budget),
        )
}
