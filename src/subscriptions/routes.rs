//! Subscription routes

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers;

pub fn subscriptions_routes() -> Router {
    Router::new()
        .route(
            "/api/subscriptions",
            get(handlers::get_subscriptions).post(handlers::create_subscription),
        )
        .route(
            "/api/subscriptions/:id",
            get(handlers::get_subscription_by_id)
                .put(handlers::update_subscription)
                .delete(handlers::delete_subscription),
        )
        .route(
            "/api/subscriptions/:id/paid",
            patch(handlers::set_subscription_paid),
        )
}
