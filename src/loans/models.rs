use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Loan {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Installment amount due on `due_date`
    pub amount: f64,
    /// Full amount borrowed
    pub total_amount: f64,
    pub installments: i64,
    pub installments_paid: i64,
    /// RFC 3339 timestamp of the next installment
    pub due_date: String,
    /// Whether the current installment has been paid
    pub is_paid: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLoanRequest {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub total_amount: f64,
    pub installments: i64,
    pub installments_paid: Option<i64>,
    pub due_date: String,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLoanRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub installments: Option<i64>,
    pub installments_paid: Option<i64>,
    pub due_date: Option<String>,
    pub is_paid: Option<bool>,
}
