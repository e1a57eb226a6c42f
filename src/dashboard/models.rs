use serde::Serialize;

/// Headline figures for the dashboard KPI row
#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardSummary {
    /// Sum of unpaid subscription amounts
    pub monthly_subscription_total: f64,
    /// Outstanding loan principal across all loans
    pub open_loan_balance: f64,
    pub goals_target_total: f64,
    pub goals_saved_total: f64,
    /// Length of the upcoming-payments list at evaluation time
    pub upcoming_payment_count: usize,
}
