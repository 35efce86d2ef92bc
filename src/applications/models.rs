// src/applications/models.rs

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::common::helpers::de_lenient_f64;

// ============================================================================
// Loan Application Models
// ============================================================================

/// Fee charged on every application, collected through the checkout flow
/// once the application is approved.
pub const APPLICATION_FEE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Unpaid,
    Paid,
}

/// A borrower's loan application as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: String,
    #[serde(default)]
    pub loan_title: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub interest_rate: f64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub income_source: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub monthly_income: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub loan_amount: f64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub extra_notes: Option<String>,
    #[serde(default)]
    pub application_date: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub payment_status: Option<PaymentState>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub application_fee: f64,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// Borrower-entered application form fields, prior to submission.
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub national_id: String,
    pub income_source: String,
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub reason: String,
    pub address: String,
    pub extra_notes: Option<String>,
}

/// Submission payload. Status is always forced to `pending` and payment to
/// `unpaid` regardless of the caller; only the backend moves them forward.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoanApplication {
    pub user_email: String,
    pub loan_title: String,
    pub interest_rate: f64,
    pub first_name: String,
    pub last_name: String,
    pub contact_number: String,
    pub national_id: String,
    pub income_source: String,
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub reason: String,
    pub address: String,
    pub extra_notes: Option<String>,
    pub application_date: String,
    pub status: ApplicationStatus,
    pub payment_status: PaymentState,
    pub application_fee: f64,
}

impl NewLoanApplication {
    /// Assembles a submission for `loan_title` at `interest_rate` from the
    /// signed-in borrower's form input.
    pub fn assemble(
        user_email: &str,
        loan_title: &str,
        interest_rate: f64,
        form: ApplicationForm,
    ) -> Self {
        Self {
            user_email: user_email.to_string(),
            loan_title: loan_title.to_string(),
            interest_rate,
            first_name: form.first_name,
            last_name: form.last_name,
            contact_number: form.contact_number,
            national_id: form.national_id,
            income_source: form.income_source,
            monthly_income: form.monthly_income,
            loan_amount: form.loan_amount,
            reason: form.reason,
            address: form.address,
            extra_notes: form.extra_notes,
            application_date: Local::now().format("%Y-%m-%d").to_string(),
            status: ApplicationStatus::Pending,
            payment_status: PaymentState::Unpaid,
            application_fee: APPLICATION_FEE,
        }
    }
}

/// Optional filters for the application list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub email: Option<String>,
    pub status: Option<ApplicationStatus>,
}

impl ApplicationFilter {
    pub fn for_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            status: None,
        }
    }

    pub fn for_status(status: ApplicationStatus) -> Self {
        Self {
            email: None,
            status: Some(status),
        }
    }

    /// Query string for `/loanApplication`, empty when unfiltered.
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(email) = &self.email {
            params.push(format!("email={}", urlencoding::encode(email)));
        }
        if let Some(status) = &self.status {
            params.push(format!("status={}", status));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// Wire body of a status transition: the backend patches the record's
/// status from the `currentStatus` field.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    pub current_status: ApplicationStatus,
}
