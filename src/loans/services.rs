use super::models::{CreateLoanRequest, Loan, UpdateLoanRequest};
use super::validators::LoanValidator;
use crate::common::{generate_loan_id, ApiError, Validator};
use sqlx::SqlitePool;
use tracing::info;

pub struct LoansService {
    db: SqlitePool,
}

impl LoansService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get all loans for a user, soonest installment first
    pub async fn list(&self, user_id: &str) -> Result<Vec<Loan>, ApiError> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT id, user_id, title, description, amount, total_amount,
                   installments, installments_paid, due_date, is_paid,
                   created_at, updated_at
            FROM loans
            WHERE user_id = ?
            ORDER BY due_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(loans)
    }

    /// Get one loan; records of other users read as not found
    pub async fn get(&self, user_id: &str, id: &str) -> Result<Loan, ApiError> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            SELECT id, user_id, title, description, amount, total_amount,
                   installments, installments_paid, due_date, is_paid,
                   created_at, updated_at
            FROM loans
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Loan not found".to_string()))?;

        Ok(loan)
    }

    pub async fn create(&self, user_id: &str, request: CreateLoanRequest) -> Result<Loan, ApiError> {
        LoanValidator
            .validate(&request)
            .into_result()
            .map_err(ApiError::from)?;

        let id = generate_loan_id();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO loans (
                id, user_id, title, description, amount, total_amount,
                installments, installments_paid, due_date, is_paid,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.amount)
        .bind(request.total_amount)
        .bind(request.installments)
        .bind(request.installments_paid.unwrap_or(0))
        .bind(&request.due_date)
        .bind(request.is_paid.unwrap_or(false))
        .bind(&now)
        .bind(&now)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(loan_id = %id, user_id = %user_id, "Created loan");

        self.get(user_id, &id).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        request: UpdateLoanRequest,
    ) -> Result<Loan, ApiError> {
        LoanValidator
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
        let total_amount = request.total_amount.unwrap_or(existing.total_amount);
        let installments = request.installments.unwrap_or(existing.installments);
        let installments_paid = request
            .installments_paid
            .unwrap_or(existing.installments_paid);
        let due_date = request.due_date.unwrap_or(existing.due_date);
        let is_paid = request.is_paid.unwrap_or(existing.is_paid);

        sqlx::query(
            r#"
            UPDATE loans
            SET title = ?, description = ?, amount = ?, total_amount = ?,
                installments = ?, installments_paid = ?, due_date = ?, is_paid = ?,
                updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(amount)
        .bind(total_amount)
        .bind(installments)
        .bind(installments_paid)
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
        self.get(user_id, id).await?;

        sqlx::query("DELETE FROM loans WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(loan_id = %id, user_id = %user_id, "Deleted loan");

        Ok(())
    }

    /// Mark the current installment paid and advance the counter
    pub async fn pay_installment(&self, user_id: &str, id: &str) -> Result<Loan, ApiError> {
        let loan = self.get(user_id, id).await?;

        if loan.is_paid {
            return Err(ApiError::BadRequest(
                "Current installment is already paid".to_string(),
            ));
        }

        let installments_paid = (loan.installments_paid + 1).min(loan.installments);
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            UPDATE loans
            SET installments_paid = ?, is_paid = 1, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(installments_paid)
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(
            loan_id = %id,
            user_id = %user_id,
            installments_paid = installments_paid,
            "Loan installment paid"
        );

        self.get(user_id, id).await
    }
}
