use super::models::{CreateGoalRequest, DepositRequest, UpdateGoalRequest};
use super::services::GoalsService;
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

/// GET /api/goals - Goals of the current user
pub async fn get_goals(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = GoalsService::new(app_state.db.clone());

    let goals = service.list(&user.id).await?;

    Ok(Json(goals))
}

/// POST /api/goals - Create a goal
pub async fn create_goal(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateGoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = GoalsService::new(app_state.db.clone());

    let goal = service.create(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(goal)))
}

/// PUT /api/goals/:id - Update goal
pub async fn update_goal(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateGoalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = GoalsService::new(app_state.db.clone());

    let goal = service.update(&user.id, &id, request).await?;

    Ok(Json(goal))
}

/// DELETE /api/goals/:id - Delete goal
pub async fn delete_goal(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = GoalsService::new(app_state.db.clone());

    service.delete(&user.id, &id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// PATCH /api/goals/:id/deposit - Add to the saved amount
pub async fn deposit_to_goal(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
    Json(request): Json<DepositRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = GoalsService::new(app_state.db.clone());

    let goal = service.deposit(&user.id, &id, request).await?;

    Ok(Json(goal))
}
