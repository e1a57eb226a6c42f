//! Loan routes

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers;

pub fn loans_routes() -> Router {
    Router::new()
        .route(
            "/api/loans",
            get(handlers::get_loans).post(handlers::create_loan),
        )
        .route(
            "/api/loans/:id",
            get(handlers::get_loan_by_id)
                .put(handlers::update_loan)
                .delete(handlers::delete_loan),
        )
        .route("/api/loans/:id/paid", patch(handlers::pay_loan_installment))
}
