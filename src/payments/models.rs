// src/payments/models.rs

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::applications::LoanApplication;
use crate::common::helpers::de_lenient_f64;

// ============================================================================
// Payment Models
// ============================================================================

/// Body of `POST /create-checkout-session`: the application fee for an
/// approved loan application.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub loan_id: String,
    pub loan_title: String,
    pub amount: f64,
    pub customer_email: String,
    pub payment_date: String,
}

impl CheckoutRequest {
    pub fn for_application(application: &LoanApplication) -> Self {
        Self {
            loan_id: application.id.clone(),
            loan_title: application
                .loan_title
                .clone()
                .unwrap_or_else(|| "General Loan".to_string()),
            amount: application.application_fee,
            customer_email: application.user_email.clone(),
            payment_date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Hosted checkout session; the shell hands `url` to the browser.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
}

/// Result of confirming a checkout session after the redirect back.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub transaction_id: String,
}

/// Stored receipt for a completed payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub transaction_id: String,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub loan_title: Option<String>,
    #[serde(default)]
    pub payment_date: Option<String>,
}
