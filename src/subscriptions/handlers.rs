use super::models::{CreateSubscriptionRequest, SetPaidRequest, UpdateSubscriptionRequest};
use super::services::SubscriptionsService;
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

/// GET /api/subscriptions - All subscriptions of the current user
pub async fn get_subscriptions(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = SubscriptionsService::new(app_state.db.clone());

    let subscriptions = service.list(&user.id).await?;

    Ok(Json(subscriptions))
}

/// POST /api/subscriptions - Create a subscription
pub async fn create_subscription(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Json(request): Json<CreateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = SubscriptionsService::new(app_state.db.clone());

    let subscription = service.create(&user.id, request).await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

/// GET /api/subscriptions/:id - Get subscription by ID
pub async fn get_subscription_by_id(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = SubscriptionsService::new(app_state.db.clone());

    let subscription = service.get(&user.id, &id).await?;

    Ok(Json(subscription))
}

/// PUT /api/subscriptions/:id - Update subscription
pub async fn update_subscription(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = SubscriptionsService::new(app_state.db.clone());

    let subscription = service.update(&user.id, &id, request).await?;

    Ok(Json(subscription))
}

/// DELETE /api/subscriptions/:id - Delete subscription
pub async fn delete_subscription(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = SubscriptionsService::new(app_state.db.clone());

    service.delete(&user.id, &id).await?;

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// PATCH /api/subscriptions/:id/paid - Mark subscription paid or unpaid
pub async fn set_subscription_paid(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
    Path(id): Path<String>,
    Json(request): Json<SetPaidRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;
    let service = SubscriptionsService::new(app_state.db.clone());

    let subscription = service.set_paid(&user.id, &id, request.is_paid).await?;

    Ok(Json(subscription))
}
