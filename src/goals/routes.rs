//! Goal routes

use axum::{
    routing::{get, patch, put},
    Router,
};

use super::handlers;

pub fn goals_routes() -> Router {
    Router::new()
        .route(
            "/api/goals",
            get(handlers::get_goals).post(handlers::create_goal),
        )
        .route(
            "/api/goals/:id",
            put(handlers::update_goal).delete(handlers::delete_goal),
        )
        .route("/api/goals/:id/deposit", patch(handlers::deposit_to_goal))
}
