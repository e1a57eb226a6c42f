use super::aggregator::{build_upcoming_payments, parse_due_date};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use crate::loans::LoansService;
use crate::subscriptions::SubscriptionsService;
use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

/// GET /api/payments/upcoming - Near-term payment obligations of the current
/// user, soonest first
pub async fn get_upcoming_payments(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;

    let subscriptions = SubscriptionsService::new(app_state.db.clone())
        .list(&user.id)
        .await?;
    let loans = LoansService::new(app_state.db.clone()).list(&user.id).await?;

    // The aggregator silently drops malformed rows; surface them in the log
    for subscription in &subscriptions {
        if parse_due_date(&subscription.due_date).is_none() {
            warn!(
                subscription_id = %subscription.id,
                due_date = %subscription.due_date,
                "Skipping subscription with malformed due date"
            );
        }
    }
    for loan in &loans {
        if parse_due_date(&loan.due_date).is_none() {
            warn!(
                loan_id = %loan.id,
                due_date = %loan.due_date,
                "Skipping loan with malformed due date"
            );
        }
    }

    let payments = build_upcoming_payments(&subscriptions, &loans, Utc::now());

    Ok(Json(payments))
}
