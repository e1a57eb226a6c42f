//! Tests for loan validators

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::loans::models::*;
    use crate::loans::validators::*;

    fn valid_create() -> CreateLoanRequest {
        CreateLoanRequest {
            title: "Car Loan".to_string(),
            description: None,
            amount: 500.0,
            total_amount: 12000.0,
            installments: 24,
            installments_paid: Some(3),
            due_date: "2026-09-15T00:00:00Z".to_string(),
            is_paid: Some(false),
        }
    }

    #[test]
    fn test_create_validator_accepts_valid_data() {
        let issues = LoanValidator.validate(&valid_create());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_create_validator_rejects_zero_installments() {
        let mut request = valid_create();
        request.installments = 0;
        request.installments_paid = None;

        let issues = LoanValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "installments");
    }

    #[test]
    fn test_create_validator_rejects_overpaid_installments() {
        let mut request = valid_create();
        request.installments_paid = Some(25);

        let issues = LoanValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "installments_paid");
    }

    #[test]
    fn test_create_validator_rejects_malformed_due_date() {
        let mut request = valid_create();
        request.due_date = "15/09/2026".to_string();

        let issues = LoanValidator.validate(&request);
        assert_eq!(issues.errors.len(), 1);
        assert_eq!(issues.errors[0].field, "due_date");
    }

    #[test]
    fn test_update_validator_ignores_absent_fields() {
        let request = UpdateLoanRequest {
            title: None,
            description: None,
            amount: None,
            total_amount: None,
            installments: None,
            installments_paid: None,
            due_date: None,
            is_paid: Some(true),
        };

        let issues = LoanValidator.validate(&request);
        assert!(issues.is_empty());
    }
}
