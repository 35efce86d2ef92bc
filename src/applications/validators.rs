// src/applications/validators.rs

use regex::Regex;

use super::models::NewLoanApplication;
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Application Validators
// ============================================================================

pub struct ApplicationValidator;

impl Validator<NewLoanApplication> for ApplicationValidator {
    fn validate(&self, data: &NewLoanApplication) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.first_name.trim().is_empty() {
            result.add_error("firstName", "First name is required");
        }
        if data.last_name.trim().is_empty() {
            result.add_error("lastName", "Last name is required");
        }

        // 7-15 digits, optional leading +
        let contact_re = Regex::new(r"^\+?\d{7,15}$").expect("contact number pattern");
        if !contact_re.is_match(data.contact_number.trim()) {
            result.add_error("contactNumber", "Contact number must be 7-15 digits");
        }

        if data.national_id.trim().len() < 5 {
            result.add_error("nationalId", "National ID must be at least 5 characters");
        }

        if data.income_source.trim().is_empty() {
            result.add_error("incomeSource", "Income source is required");
        }

        if data.monthly_income <= 0.0 {
            result.add_error("monthlyIncome", "Monthly income must be greater than zero");
        }

        if data.loan_amount <= 0.0 {
            result.add_error("loanAmount", "Loan amount must be greater than zero");
        }

        if data.reason.trim().is_empty() {
            result.add_error("reason", "Loan reason is required");
        }

        if data.address.trim().is_empty() {
            result.add_error("address", "Address is required");
        }

        result
    }
}
