// src/loans/validators.rs

use super::models::*;
use crate::common::{ValidationIssues, Validator};
use crate::subscriptions::validators::is_valid_due_date;

pub struct LoanValidator;

impl Validator<CreateLoanRequest> for LoanValidator {
    fn validate(&self, data: &CreateLoanRequest) -> ValidationIssues {
        let mut issues = ValidationIssues::new();

        if data.title.trim().is_empty() {
            issues.push("title", "Title is required");
        } else if data.title.len() > 200 {
            issues.push("title", "Title must be less than 200 characters");
        }

        if !data.amount.is_finite() {
            issues.push("amount", "Amount must be a number");
        }

        if !data.total_amount.is_finite() {
            issues.push("total_amount", "Total amount must be a number");
        }

        if data.installments < 1 {
            issues.push("installments", "Installments must be at least 1");
        }

        if let Some(paid) = data.installments_paid {
            if paid < 0 || paid > data.installments {
                issues.push(
                    "installments_paid",
                    "Paid installments must be between 0 and the installment count",
                );
            }
        }

        if !is_valid_due_date(&data.due_date) {
            issues.push("due_date", "Due date must be an RFC 3339 timestamp");
        }

        issues
    }
}

impl Validator<UpdateLoanRequest> for LoanValidator {
    fn validate(&self, data: &UpdateLoanRequest) -> ValidationIssues {
        let mut issues = ValidationIssues::new();

        if let Some(title) = &data.title {
            if title.trim().is_empty() {
                issues.push("title", "Title cannot be blank");
            }
        }

        if let Some(amount) = data.amount {
            if !amount.is_finite() {
                issues.push("amount", "Amount must be a number");
            }
        }

        if let Some(total) = data.total_amount {
            if !total.is_finite() {
                issues.push("total_amount", "Total amount must be a number");
            }
        }

        if let Some(installments) = data.installments {
            if installments < 1 {
                issues.push("installments", "Installments must be at least 1");
            }
        }

        if let Some(due_date) = &data.due_date {
            if !is_valid_due_date(due_date) {
                issues.push("due_date", "Due date must be an RFC 3339 timestamp");
            }
        }

        issues
    }
}
