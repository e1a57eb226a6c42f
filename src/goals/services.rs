use super::models::{CreateGoalRequest, DepositRequest, Goal, UpdateGoalRequest};
use crate::common::{generate_goal_id, ApiError};
use sqlx::SqlitePool;
use tracing::info;

pub struct GoalsService {
    db: SqlitePool,
}

impl GoalsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Goal>, ApiError> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, title, target_amount, saved_amount, deadline,
                   created_at, updated_at
            FROM goals
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(goals)
    }

    pub async fn get(&self, user_id: &str, id: &str) -> Result<Goal, ApiError> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, title, target_amount, saved_amount, deadline,
                   created_at, updated_at
            FROM goals
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        Ok(goal)
    }

    pub async fn create(&self, user_id: &str, request: CreateGoalRequest) -> Result<Goal, ApiError> {
        if request.title.trim().is_empty() {
            return Err(ApiError::ValidationError("title: is required".to_string()));
        }
        if !(request.target_amount.is_finite() && request.target_amount > 0.0) {
            return Err(ApiError::ValidationError(
                "target_amount: must be positive".to_string(),
            ));
        }

        let id = generate_goal_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO goals (
                id, user_id, title, target_amount, saved_amount, deadline,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(request.title.trim())
        .bind(request.target_amount)
        .bind(request.saved_amount.unwrap_or(0.0))
        .bind(&request.deadline)
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(goal_id = %id, user_id = %user_id, "Created goal");

        self.get(user_id, &id).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        request: UpdateGoalRequest,
    ) -> Result<Goal, ApiError> {
        if let Some(title) = &request.title {
            if title.trim().is_empty() {
                return Err(ApiError::ValidationError(
                    "title: cannot be blank".to_string(),
                ));
            }
        }
        if let Some(target) = request.target_amount {
            if !(target.is_finite() && target > 0.0) {
                return Err(ApiError::ValidationError(
                    "target_amount: must be positive".to_string(),
                ));
            }
        }

        let existing = self.get(user_id, id).await?;
        let now = chrono::Utc::now().to_rfc3339();

        let title = request
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or(existing.title);
        let target_amount = request.target_amount.unwrap_or(existing.target_amount);
        let saved_amount = request.saved_amount.unwrap_or(existing.saved_amount);
        let deadline = request.deadline.or(existing.deadline);

        sqlx::query(
            r#"
            UPDATE goals
            SET title = ?, target_amount = ?, saved_amount = ?, deadline = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&title)
        .bind(target_amount)
        .bind(saved_amount)
        .bind(&deadline)
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

        sqlx::query("DELETE FROM goals WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(goal_id = %id, user_id = %user_id, "Deleted goal");

        Ok(())
    }

    /// Add to the saved amount
    pub async fn deposit(
        &self,
        user_id: &str,
        id: &str,
        request: DepositRequest,
    ) -> Result<Goal, ApiError> {
        if !(request.amount.is_finite() && request.amount > 0.0) {
            return Err(ApiError::ValidationError(
                "amount: must be positive".to_string(),
            ));
        }

        let goal = self.get(user_id, id).await?;
        let saved_amount = goal.saved_amount + request.amount;
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query("UPDATE goals SET saved_amount = ?, updated_at = ? WHERE id = ? AND user_id = ?")
            .bind(saved_amount)
            .bind(&now)
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(
            goal_id = %id,
            user_id = %user_id,
            amount = request.amount,
            "Goal deposit recorded"
        );

        self.get(user_id, id).await
    }
}
