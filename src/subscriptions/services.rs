use super::models::{CreateSubscriptionRequest, Subscription, UpdateSubscriptionRequest};
use super::validators::SubscriptionValidator;
use crate::common::{generate_subscription_id, ApiError, Validator};
use sqlx::SqlitePool;
use tracing::info;

pub struct SubscriptionsService {
    db: SqlitePool,
}

impl SubscriptionsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all subscriptions for a user, soonest due first
    pub async fn list(&self, user_id: &str) -> Result<Vec<Subscription>, ApiError> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, user_id, title, description, amount, due_date, is_paid,
                   created_at, updated_at
            FROM subscriptions
            WHERE user_id = ?
            ORDER BY due_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(subscriptions)
    }

    /// Get one subscription; records of other users read as not found
    pub async fn get(&self, user_id: &str, id: &str) -> Result<Subscription, ApiError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT id, user_id, title, description, amount, due_date, is_paid,
                   created_at, updated_at
            FROM subscriptions
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

        Ok(subscription)
    }

    pub async fn create(
        &self,
        user_id: &str,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        SubscriptionValidator
            .validate(&request)
            .into_result()
            .map_err(ApiError::from)?;

        let id = generate_subscription_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, title, description, amount, due_date, is_paid,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.amount)
        .bind(&request.due_date)
        .bind(request.is_paid.unwrap_or(false))
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(subscription_id = %id, user_id = %user_id, "Created subscription");

        self.get(user_id, &id).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        request: UpdateSubscriptionRequest,
    ) -> Result<Subscription, ApiError> {
        SubscriptionValidator
            .validate(&request)
            .into_result()
            .map_err(ApiError::from)?;

        let existing = self.get(user_id, id).await?;
        let now = chrono::Utc::now().to_rfc3339();

        let title = request
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or(existing.title);
        let description = request.description.or(existing.description);
        let amount = request.amount.unwrap_or(existing.amount);
        let due_date = request.due_date.unwrap_or(existing.due_date);
        let is_paid = request.is_paid.unwrap_or(existing.is_paid);

        sqlx::query(
            r#"
            UPDATE subscriptions
            SET title = ?, description = ?, amount = ?, due_date = ?, is_paid = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(amount)
        .bind(&due_date)
        .bind(is_paid)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        self.get(user_id, id).await
    }

    pub async fn delete(&self, user_id: &str, id: &str) -> Result<(), ApiError> {
        // Ensure the record exists and belongs to the caller
        self.get(user_id, id).await?;

        sqlx::query("DELETE FROM subscriptions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(subscription_id = %id, user_id = %user_id, "Deleted subscription");

        Ok(())
    }

    pub async fn set_paid(
        &self,
        user_id: &str,
        id: &str,
        is_paid: bool,
    ) -> Result<Subscription, ApiError> {
        self.get(user_id, id).await?;

        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "UPDATE subscriptions SET is_paid = ?, updated_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(is_paid)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        self.get(user_id, id).await
    }
}
