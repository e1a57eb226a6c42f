use super::models::{BudgetListQuery, CreateBudgetRequest, UpdateBudgetRequest};
use super::services::BudgetsService;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/budgets?month=YYYY-MM - Budgets of the current user
pub async fn get_budgets(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Query(query): Query<BudgetListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = BudgetsService::new(app_state.db.clone());

    let budgets = service.list(&user.id, query.month.as_deref()).await?;

    Ok(Json(budgets))
}

/// POST /api/budgets - Create a budget
pub async fn create_budget(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = BudgetsService::new(app_state.db.clone());

    let budget = service.create(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT /api/budgets/:id - Update budget
pub async fn update_budget(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBudgetRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = BudgetsService::new(app_state.db.clone());

    let budget = service.update(&user.id, &id, request).await?;

    Ok(Json(budget))
}

/// DELETE /api/budgets/:id - Delete budget
pub async fn delete_budget(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = BudgetsService::new(app_state.db.clone());

    service.delete(&user.id, &id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
