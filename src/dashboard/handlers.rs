use super::models::DashboardSummary;
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};
use crate::goals::{Goal, GoalsService};
use crate::loans::{Loan, LoansService};
use crate::payments::build_upcoming_payments;
use crate::subscriptions::{Subscription, SubscriptionsService};
use axum::{extract::Extension, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/dashboard/summary - KPI figures for the current user
pub async fn get_summary(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    user: AuthedUser,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;

    let subscriptions = SubscriptionsService::new(app_state.db.clone())
        .list(&user.id)
        .await?;
    let loans = LoansService::new(app_state.db.clone()).list(&user.id).await?;
    let goals = GoalsService::new(app_state.db.clone()).list(&user.id).await?;

    let summary = summarize(&subscriptions, &loans, &goals, Utc::now());

    Ok(Json(summary))
}

/// Pure summary computation over freshly fetched records
fn summarize(
    subscriptions: &[Subscription],
    loans: &[Loan],
    goals: &[Goal],
    now: DateTime<Utc>,
) -> DashboardSummary {
    let monthly_subscription_total = subscriptions
        .iter()
        .filter(|s| !s.is_paid)
        .map(|s| s.amount)
        .sum();

    let open_loan_balance = loans
        .iter()
        .map(|l| (l.total_amount - l.installments_paid as f64 * l.amount).max(0.0))
        .sum();

    let goals_target_total = goals.iter().map(|g| g.target_amount).sum();
    let goals_saved_total = goals.iter().map(|g| g.saved_amount).sum();

    let upcoming_payment_count = build_upcoming_payments(subscriptions, loans, now).len();

    DashboardSummary {
        monthly_subscription_total,
        open_loan_balance,
        goals_target_total,
        goals_saved_total,
        upcoming_payment_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn subscription(amount: f64, is_paid: bool) -> Subscription {
        Subscription {
            id: "SB_TEST01".to_string(),
            user_id: "U_TEST01".to_string(),
            title: "Sub".to_string(),
            description: None,
            amount,
            due_date: (now() + Duration::days(3)).to_rfc3339(),
            is_paid,
            created_at: None,
            updated_at: None,
        }
    }

    fn loan(total: f64, installment: f64, paid: i64) -> Loan {
        Loan {
            id: "LN_TEST01".to_string(),
            user_id: "U_TEST01".to_string(),
            title: "Loan".to_string(),
            description: None,
            amount: installment,
            total_amount: total,
            installments: 10,
            installments_paid: paid,
            due_date: (now() + Duration::days(5)).to_rfc3339(),
            is_paid: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn goal(target: f64, saved: f64) -> Goal {
        Goal {
            id: "GL_TEST01".to_string(),
            user_id: "U_TEST01".to_string(),
            title: "Goal".to_string(),
            target_amount: target,
            saved_amount: saved,
            deadline: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_summary_counts_only_unpaid_subscriptions() {
        let subscriptions = vec![subscription(39.9, false), subscription(29.9, true)];

        let summary = summarize(&subscriptions, &[], &[], now());

        assert_eq!(summary.monthly_subscription_total, 39.9);
        assert_eq!(summary.upcoming_payment_count, 1);
    }

    #[test]
    fn test_summary_loan_balance_subtracts_paid_installments() {
        let loans = vec![loan(1000.0, 100.0, 3)];

        let summary = summarize(&[], &loans, &[], now());

        assert_eq!(summary.open_loan_balance, 700.0);
        assert_eq!(summary.upcoming_payment_count, 1);
    }

    #[test]
    fn test_summary_loan_balance_never_negative() {
        // Installment overpayment must not push the balance below zero
        let loans = vec![loan(500.0, 100.0, 10)];

        let summary = summarize(&[], &loans, &[], now());

        assert_eq!(summary.open_loan_balance, 0.0);
    }

    #[test]
    fn test_summary_goal_totals() {
        let goals = vec![goal(1000.0, 250.0), goal(500.0, 500.0)];

        let summary = summarize(&[], &[], &goals, now());

        assert_eq!(summary.goals_target_total, 1500.0);
        assert_eq!(summary.goals_saved_total, 750.0);
    }
}
