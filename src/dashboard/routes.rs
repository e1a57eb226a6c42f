//! Dashboard routes

use axum::{routing::get, Router};

use super::handlers;

pub fn dashboard_routes() -> Router {
    Router::new().route("/api/dashboard/summary", get(handlers::get_summary))
}
