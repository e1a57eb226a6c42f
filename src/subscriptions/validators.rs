// src/subscriptions/validators.rs

use super::models::*;
use crate::common::{ValidationIssues, Validator};
use chrono::DateTime;

pub struct SubscriptionValidator;

impl Validator<CreateSubscriptionRequest> for SubscriptionValidator {
    fn validate(&self, data: &CreateSubscriptionRequest) -> ValidationIssues {
        let mut issues = ValidationIssues::new();

        if data.title.trim().is_empty() {
            issues.push("title", "Title is required");
        } else if data.title.len() > 200 {
            issues.push("title", "Title must be less than 200 characters");
        }

        if !data.amount.is_finite() {
            issues.push("amount", "Amount must be a number");
        }

        if !is_valid_due_date(&data.due_date) {
            issues.push("due_date", "Due date must be an RFC 3339 timestamp");
        }

        issues
    }
}

impl Validator<UpdateSubscriptionRequest> for SubscriptionValidator {
    fn validate(&self, data: &UpdateSubscriptionRequest) -> ValidationIssues {
        let mut issues = ValidationIssues::new();

        if let Some(title) = &data.title {
            if title.trim().is_empty() {
                issues.push("title", "Title cannot be blank");
            } else if title.len() > 200 {
                issues.push("title", "Title must be less than 200 characters");
            }
        }

        if let Some(amount) = data.amount {
            if !amount.is_finite() {
                issues.push("amount", "Amount must be a number");
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

pub fn is_valid_due_date(raw: &str) -> bool {
    DateTime::parse_from_rfc3339(raw).is_ok()
}
