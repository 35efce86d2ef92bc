//! Tests for loan product models and validation

#[cfg(test)]
mod tests {
    use crate::common::Validator;
    use crate::loans::models::{Loan, LoanPage, NewLoan};
    use crate::loans::validators::NewLoanValidator;

    fn sample_new_loan() -> NewLoan {
        NewLoan {
            loan_title: "Small Business Starter".to_string(),
            description: "Working capital for new businesses".to_string(),
            category: "Business".to_string(),
            interest_rate: 6.5,
            max_loan_limit: 50000.0,
            required_documents: Some("National ID, bank statement".to_string()),
            emi_plans: Some("6/12/24 months".to_string()),
            image: Some("https://img.example/loan.png".to_string()),
            show_on_home: false,
            manager_email: "manager@example.com".to_string(),
            created_by: "Morgan Lee".to_string(),
            created_at: "2026-01-15 10:00:00".to_string(),
        }
    }

    #[test]
    fn test_loan_deserializes_stringified_numbers() {
        // Records created through the web form carry numeric fields as strings.
        let raw = r#"{
            "_id": "6753a9",
            "loanTitle": "Agri Loan",
            "category": "Agriculture",
            "interestRate": "7.25",
            "maxLoanLimit": "200000",
            "showOnHome": true,
            "managerEmail": "manager@example.com"
        }"#;

        let loan: Loan = serde_json::from_str(raw).unwrap();
        assert_eq!(loan.id, "6753a9");
        assert_eq!(loan.loan_title, "Agri Loan");
        assert_eq!(loan.interest_rate, 7.25);
        assert_eq!(loan.max_loan_limit, 200000.0);
        assert!(loan.show_on_home);
        assert!(loan.description.is_none());
    }

    #[test]
    fn test_new_loan_serializes_camel_case() {
        let value = serde_json::to_value(sample_new_loan()).unwrap();
        assert_eq!(value["loanTitle"], "Small Business Starter");
        assert_eq!(value["maxLoanLimit"], 50000.0);
        assert_eq!(value["showOnHome"], false);
        assert_eq!(value["managerEmail"], "manager@example.com");
    }

    #[test]
    fn test_paged_response_passes_through() {
        let raw = r#"{
            "loans": [{"_id": "1", "loanTitle": "A"}],
            "totalPages": 4
        }"#;
        let page: LoanPage = serde_json::from_str(raw).unwrap();
        let listing = page.into_listing(2, 9);
        assert_eq!(listing.loans.len(), 1);
        assert_eq!(listing.total_pages, 4);
    }

    #[test]
    fn test_array_response_is_paginated_client_side() {
        // Older backend deployments return the full array; the client
        // slices the requested window itself.
        let loans: Vec<serde_json::Value> = (0..20)
            .map(|i| serde_json::json!({ "_id": i.to_string(), "loanTitle": format!("Loan {}", i) }))
            .collect();
        let page: LoanPage = serde_json::from_value(serde_json::Value::Array(loans)).unwrap();

        let listing = page.into_listing(2, 9);
        assert_eq!(listing.total_pages, 3);
        assert_eq!(listing.loans.len(), 9);
        assert_eq!(listing.loans[0].id, "9");
        assert_eq!(listing.loans[8].id, "17");
    }

    #[test]
    fn test_validator_accepts_complete_loan() {
        let result = NewLoanValidator.validate(&sample_new_loan());
        assert!(result.is_valid, "errors: {:?}", result.errors);
    }

    #[test]
    fn test_validator_rejects_missing_title_and_bad_rates() {
        let mut loan = sample_new_loan();
        loan.loan_title = "  ".to_string();
        loan.interest_rate = 0.0;
        loan.max_loan_limit = -5.0;

        let result = NewLoanValidator.validate(&loan);
        assert!(!result.is_valid);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"loanTitle"));
        assert!(fields.contains(&"interestRate"));
        assert!(fields.contains(&"maxLoanLimit"));
    }

    #[test]
    fn test_validator_rejects_non_hosted_image() {
        let mut loan = sample_new_loan();
        loan.image = Some("/tmp/local.png".to_string());
        let result = NewLoanValidator.validate(&loan);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "image");
    }
}
