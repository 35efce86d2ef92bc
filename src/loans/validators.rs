// src/loans/validators.rs

use super::models::NewLoan;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Loan Validators
// ============================================================================

pub struct NewLoanValidator;

impl Validator<NewLoan> for NewLoanValidator {
    fn validate(&self, data: &NewLoan) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.loan_title.trim().is_empty() {
            result.add_error("loanTitle", "Loan title is required");
        } else if data.loan_title.len() > 255 {
            result.add_error("loanTitle", "Loan title must be less than 255 characters");
        }

        if data.description.trim().is_empty() {
            result.add_error("description", "Description is required");
        }

        if data.category.trim().is_empty() {
            result.add_error("category", "Category is required");
        }

        if data.interest_rate <= 0.0 {
            result.add_error("interestRate", "Interest rate must be greater than zero");
        } else if data.interest_rate > 100.0 {
            result.add_error("interestRate", "Interest rate cannot exceed 100%");
        }

        if data.max_loan_limit <= 0.0 {
            result.add_error("maxLoanLimit", "Maximum loan limit must be greater than zero");
        }

        if let Some(image) = &data.image {
            if !image.starts_with("http://") && !image.starts_with("https://") {
                result.add_error("image", "Image must be a hosted URL");
            }
        }

        if data.manager_email.trim().is_empty() {
            result.add_error("managerEmail", "Manager email is required");
        }

        result
    }
}
