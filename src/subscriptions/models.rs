use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    /// RFC 3339 timestamp of the next charge
    pub due_date: String,
    pub is_paid: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub title: String,
    pub description: Option<String>,
    pub amount: f64,
    pub due_date: String,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<String>,
    pub is_paid: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SetPaidRequest {
    pub is_paid: bool,
}
