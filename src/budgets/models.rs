use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub limit_amount: f64,
    pub spent_amount: f64,
    /// Month key in YYYY-MM form
    pub month: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    pub limit_amount: f64,
    pub spent_amount: Option<f64>,
    pub month: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    pub limit_amount: Option<f64>,
    pub spent_amount: Option<f64>,
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    pub month: Option<String>,
}
