//! Tests for loan applications: wire shapes, submission assembly,
//! validation, and the derived dashboard statistics.

#[cfg(test)]
mod tests {
    use crate::applications::models::{
        ApplicationFilter, ApplicationForm, ApplicationStatus, LoanApplication,
        NewLoanApplication, PaymentState, StatusPatch, APPLICATION_FEE,
    };
    use crate::applications::stats::{admin_stats, borrower_stats, manager_stats};
    use crate::applications::validators::ApplicationValidator;
    use crate::common::Validator;
    use crate::loans::Loan;
    use crate::roles::{AccountStatus, Role};
    use crate::users::UserRecord;

    fn form() -> ApplicationForm {
        ApplicationForm {
            first_name: "Alex".to_string(),
            last_name: "Morgan".to_string(),
            contact_number: "+8801712345678".to_string(),
            national_id: "1987654321".to_string(),
            income_source: "Retail business".to_string(),
            monthly_income: 1200.0,
            loan_amount: 5000.0,
            reason: "Inventory expansion".to_string(),
            address: "12 Lake Road, Dhaka".to_string(),
            extra_notes: None,
        }
    }

    fn application(id: &str, status: ApplicationStatus, amount: f64) -> LoanApplication {
        LoanApplication {
            id: id.to_string(),
            user_email: "borrower@example.com".to_string(),
            loan_title: Some("Small Business Starter".to_string()),
            interest_rate: 6.5,
            first_name: "Alex".to_string(),
            last_name: "Morgan".to_string(),
            contact_number: Some("+8801712345678".to_string()),
            national_id: Some("1987654321".to_string()),
            income_source: Some("Retail business".to_string()),
            monthly_income: 1200.0,
            loan_amount: amount,
            reason: Some("Inventory expansion".to_string()),
            address: Some("12 Lake Road, Dhaka".to_string()),
            extra_notes: None,
            application_date: Some("2026-01-15".to_string()),
            status,
            payment_status: Some(PaymentState::Unpaid),
            application_fee: APPLICATION_FEE,
            transaction_id: None,
        }
    }

    #[test]
    fn test_assemble_forces_pending_and_unpaid() {
        let submission = NewLoanApplication::assemble(
            "borrower@example.com",
            "Small Business Starter",
            6.5,
            form(),
        );
        assert_eq!(submission.status, ApplicationStatus::Pending);
        assert_eq!(submission.payment_status, PaymentState::Unpaid);
        assert_eq!(submission.application_fee, APPLICATION_FEE);
        assert_eq!(submission.user_email, "borrower@example.com");
    }

    #[test]
    fn test_submission_serializes_camel_case() {
        let submission =
            NewLoanApplication::assemble("borrower@example.com", "Agri Loan", 7.25, form());
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["userEmail"], "borrower@example.com");
        assert_eq!(value["loanTitle"], "Agri Loan");
        assert_eq!(value["firstName"], "Alex");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["paymentStatus"], "unpaid");
        assert_eq!(value["applicationFee"], APPLICATION_FEE);
    }

    #[test]
    fn test_status_patch_uses_current_status_key() {
        let patch = StatusPatch {
            current_status: ApplicationStatus::Approved,
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "currentStatus": "approved" })
        );
    }

    #[test]
    fn test_application_deserializes_stringified_amounts() {
        let raw = r#"{
            "_id": "a1",
            "userEmail": "borrower@example.com",
            "firstName": "Alex",
            "lastName": "Morgan",
            "loanAmount": "5000",
            "monthlyIncome": "1200.50",
            "status": "approved",
            "applicationFee": 10
        }"#;
        let application: LoanApplication = serde_json::from_str(raw).unwrap();
        assert_eq!(application.loan_amount, 5000.0);
        assert_eq!(application.monthly_income, 1200.5);
        assert_eq!(application.status, ApplicationStatus::Approved);
    }

    #[test]
    fn test_filter_query_strings() {
        assert_eq!(ApplicationFilter::default().to_query(), "");
        assert_eq!(
            ApplicationFilter::for_status(ApplicationStatus::Pending).to_query(),
            "?status=pending"
        );
        assert_eq!(
            ApplicationFilter::for_email("a+b@example.com").to_query(),
            "?email=a%2Bb%40example.com"
        );
        let both = ApplicationFilter {
            email: Some("x@example.com".to_string()),
            status: Some(ApplicationStatus::Approved),
        };
        assert_eq!(both.to_query(), "?email=x%40example.com&status=approved");
    }

    #[test]
    fn test_validator_rejects_bad_contact_and_amounts() {
        let mut bad = form();
        bad.contact_number = "call-me".to_string();
        bad.loan_amount = 0.0;
        bad.national_id = "123".to_string();

        let submission = NewLoanApplication::assemble("b@example.com", "Loan", 6.5, bad);
        let result = ApplicationValidator.validate(&submission);
        assert!(!result.is_valid);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"contactNumber"));
        assert!(fields.contains(&"loanAmount"));
        assert!(fields.contains(&"nationalId"));
    }

    #[test]
    fn test_validator_accepts_complete_form() {
        let submission = NewLoanApplication::assemble("b@example.com", "Loan", 6.5, form());
        let result = ApplicationValidator.validate(&submission);
        assert!(result.is_valid, "errors: {:?}", result.errors);
    }

    // ------------------------------------------------------------------
    // Derived statistics
    // ------------------------------------------------------------------

    #[test]
    fn test_borrower_stats_counts_and_debt() {
        let applications = vec![
            application("1", ApplicationStatus::Approved, 5000.0),
            application("2", ApplicationStatus::Approved, 2500.0),
            application("3", ApplicationStatus::Pending, 900.0),
            application("4", ApplicationStatus::Cancelled, 100.0),
        ];

        let stats = borrower_stats(&applications);
        assert_eq!(stats.total_applications, 4);
        assert_eq!(stats.breakdown.approved, 2);
        assert_eq!(stats.breakdown.pending, 1);
        assert_eq!(stats.breakdown.rejected, 0);
        // Only approved amounts count as debt.
        assert_eq!(stats.total_debt, 7500.0);
    }

    #[test]
    fn test_status_distribution_drops_empty_buckets() {
        let applications = vec![
            application("1", ApplicationStatus::Approved, 5000.0),
            application("2", ApplicationStatus::Pending, 900.0),
        ];
        let stats = borrower_stats(&applications);
        assert_eq!(
            stats.breakdown.distribution(),
            vec![("Pending", 1), ("Approved", 1)]
        );
    }

    #[test]
    fn test_manager_stats_totals_requested_funding() {
        let applications = vec![
            application("1", ApplicationStatus::Pending, 1000.0),
            application("2", ApplicationStatus::Rejected, 2000.0),
        ];
        let stats = manager_stats(&applications);
        assert_eq!(stats.total_applications, 2);
        assert_eq!(stats.total_requested, 3000.0);
        assert_eq!(stats.breakdown.rejected, 1);
    }

    #[test]
    fn test_admin_stats_rolls_up_roles_and_categories() {
        let users = vec![
            user_record("1", Role::Admin),
            user_record("2", Role::Manager),
            user_record("3", Role::User),
            user_record("4", Role::User),
        ];
        let loans = vec![
            loan_in_category("Business"),
            loan_in_category("Business"),
            loan_in_category("Agriculture"),
            loan_without_category(),
        ];
        let applications = vec![
            application("1", ApplicationStatus::Approved, 5000.0),
            application("2", ApplicationStatus::Pending, 1000.0),
        ];

        let stats = admin_stats(&users, &loans, &applications);
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.admins, 1);
        assert_eq!(stats.managers, 1);
        assert_eq!(stats.borrowers, 2);
        assert_eq!(stats.total_funding, 6000.0);
        assert_eq!(
            stats.categories,
            vec![
                ("Agriculture".to_string(), 1),
                ("Business".to_string(), 2),
                ("Uncategorized".to_string(), 1),
            ]
        );
    }

    fn user_record(id: &str, role: Role) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            email: format!("user{}@example.com", id),
            name: None,
            photo_url: None,
            role,
            status: AccountStatus::Active,
            requested_role: None,
            created_at: None,
            updated_at: None,
            activated_at: None,
            rejected_at: None,
            suspend_reason: None,
            suspend_feedback: None,
        }
    }

    fn loan_in_category(category: &str) -> Loan {
        let mut loan = loan_without_category();
        loan.category = Some(category.to_string());
        loan
    }

    fn loan_without_category() -> Loan {
        serde_json::from_value(serde_json::json!({
            "_id": "l1",
            "loanTitle": "Loan"
        }))
        .unwrap()
    }
}
