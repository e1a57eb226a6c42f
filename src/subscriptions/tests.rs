//! Tests for subscription validators

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::subscriptions::models::*;
    use crate::subscriptions::validators::*;

    fn valid_create() -> CreateSubscriptionRequest {
        CreateSubscriptionRequest {
            title: "Netflix".to_string(),
            description: Some("Streaming".to_string()),
            amount: 39.9,
            due_date: "2026-09-01T00:00:00Z".to_string(),
            is_paid: Some(false),
        }
    }

    #[test]
    fn test_create_validator_accepts_valid_data() {
        let issues = SubscriptionValidator.validate(&valid_create());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_create_validator_rejects_blank_title() {
        let mut request = valid_create();
        request.title = "   ".to_string();

        let issues = SubscriptionValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "title");
    }

    #[test]
    fn test_create_validator_rejects_malformed_due_date() {
        let mut request = valid_create();
        request.due_date = "next friday".to_string();

        let issues = SubscriptionValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "due_date");
    }

    #[test]
    fn test_create_validator_rejects_nan_amount() {
        let mut request = valid_create();
        request.amount = f64::NAN;

        let issues = SubscriptionValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "amount");
    }

    #[test]
    fn test_update_validator_ignores_absent_fields() {
        let request = UpdateSubscriptionRequest {
            title: None,
            description: None,
            amount: None,
            due_date: None,
            is_paid: Some(true),
        };

        let issues = SubscriptionValidator.validate(&request);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_update_validator_rejects_blank_title() {
        let request = UpdateSubscriptionRequest {
            title: Some("".to_string()),
            description: None,
            amount: None,
            due_date: None,
            is_paid: None,
        };

        let issues = SubscriptionValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "title");
    }

    #[test]
    fn test_due_date_accepts_offset_timestamps() {
        assert!(is_valid_due_date("2026-09-01T00:00:00-03:00"));
        assert!(is_valid_due_date("2026-09-01T00:00:00Z"));
        assert!(!is_valid_due_date("2026-09-01"));
    }
}
