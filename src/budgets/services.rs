use super::models::{Budget, CreateBudgetRequest, UpdateBudgetRequest};
use crate::common::{generate_budget_id, ApiError};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

pub struct BudgetsService {
    db: SqlitePool,
}

impl BudgetsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get budgets for a user, optionally narrowed to one month
    pub async fn list(&self, user_id: &str, month: Option<&str>) -> Result<Vec<Budget>, ApiError> {
        let budgets = match month {
            Some(month) => {
                sqlx::query_as::<_, Budget>(
                    r#"
                    SELECT id, user_id, category, limit_amount, spent_amount, month,
                           created_at, updated_at
                    FROM budgets
                    WHERE user_id = ? AND month = ?
                    ORDER BY category ASC
                    "#,
                )
                .bind(user_id)
                .bind(month)
                .fetch_all(&self.db)
                .await
            }
            None => {
                sqlx::query_as::<_, Budget>(
                    r#"
                    SELECT id, user_id, category, limit_amount, spent_amount, month,
                           created_at, updated_at
                    FROM budgets
                    WHERE user_id = ?
                    ORDER BY month DESC, category ASC
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.db)
                .await
            }
        }
        .map_err(ApiError::DatabaseError)?;

        Ok(budgets)
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<Budget, ApiError> {
        let budget = sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, user_id, category, limit_amount, spent_amount, month,
                   created_at, updated_at
            FROM budgets
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Budget not found".to_string()))?;

        Ok(budget)
    }

    pub async fn create(
        &self,
        user_id: &str,
        request: CreateBudgetRequest,
    ) -> Result<Budget, ApiError> {
        if request.category.trim().is_empty() {
            return Err(ApiError::ValidationError(
                "category: is required".to_string(),
            ));
        }
        if !(request.limit_amount.is_finite() && request.limit_amount > 0.0) {
            return Err(ApiError::ValidationError(
                "limit_amount: must be positive".to_string(),
            ));
        }
        if !is_valid_month(&request.month) {
            return Err(ApiError::ValidationError(
                "month: must be in YYYY-MM form".to_string(),
            ));
        }

        let id = generate_budget_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO budgets (
                id, user_id, category, limit_amount, spent_amount, month,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(request.category.trim())
        .bind(request.limit_amount)
        .bind(request.spent_amount.unwrap_or(0.0))
        .bind(&request.month)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(budget_id = %id, user_id = %user_id, "Created budget");

        self.get(user_id, &id).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        request: UpdateBudgetRequest,
    ) -> Result<Budget, ApiError> {
        if let Some(category) = &request.category {
            if category.trim().is_empty() {
                return Err(ApiError::ValidationError(
                    "category: cannot be blank".to_string(),
                ));
            }
        }
        if let Some(limit) = request.limit_amount {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ApiError::ValidationError(
                    "limit_amount: must be positive".to_string(),
                ));
            }
        }
        if let Some(month) = &request.month {
            if !is_valid_month(month) {
                return Err(ApiError::ValidationError(
                    "month: must be in YYYY-MM form".to_string(),
                ));
            }
        }

        let existing = self.get(user_id, id).await?;
        let now = chrono::Utc::now().to_rfc3339();

        let category = request
            .category
            .map(|c| c.trim().to_string())
            .unwrap_or(existing.category);
        let limit_amount = request.limit_amount.unwrap_or(existing.limit_amount);
        let spent_amount = request.spent_amount.unwrap_or(existing.spent_amount);
        let month = request.month.unwrap_or(existing.month);

        sqlx::query(
            r#"
            UPDATE budgets
            SET category = ?, limit_amount = ?, spent_amount = ?, month = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&category)
        .bind(limit_amount)
        .bind(spent_amount)
        .bind(&month)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<(), ApiError> {
        self.get(user_id, id).await?;

        sqlx::query("DELETE FROM budgets WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(budget_id = %id, user_id = %user_id, "Deleted budget");

        Ok(())
    }
}

/// A month key is valid when "<key>-01" parses as a calendar date
pub fn is_valid_month(month: &str) -> bool {
    month.len() == 7 && NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_key_validation() {
        assert!(is_valid_month("2026-08"));
        assert!(is_valid_month("2026-12"));
        assert!(!is_valid_month("2026-13"));
        assert!(!is_valid_month("2026-8"));
        assert!(!is_valid_month("aug-2026"));
        assert!(!is_valid_month("2026-08-01"));
    }
}
