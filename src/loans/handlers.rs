use super::models::{CreateLoanRequest, UpdateLoanRequest};
use super::services::LoansService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/loans - All loans of the current user
pub async fn get_loans(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = LoansService::new(app_state.db.clone());

    let loans = service.list(&user.id).await?;

    Ok(Json(loans))
}

/// POST /api/loans - Create a loan
pub async fn create_loan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateLoanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = LoansService::new(app_state.db.clone());

    let loan = service.create(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// GET /api/loans/:id - Get loan by ID
pub async fn get_loan_by_id(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = LoansService::new(app_state.db.clone());

    let loan = service.get(&user.id, &id).await?;

    Ok(Json(loan))
}

/// PUT /api/loans/:id - Update loan
pub async fn update_loan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateLoanRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = LoansService::new(app_state.db.clone());

    let loan = service.update(&user.id, &id, request).await?;

    Ok(Json(loan))
}

/// DELETE /api/loans/:id - Delete loan
pub async fn delete_loan(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = LoansService::new(app_state.db.clone());

    service.delete(&user.id, &id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// PATCH /api/loans/:id/paid - Pay the current installment
pub async fn pay_loan_installment(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = LoansService::new(app_state.db.clone());

    let loan = service.pay_installment(&user.id, &id).await?;

    Ok(Json(loan))
}
