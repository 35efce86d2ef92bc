// src/loans/models.rs

use serde::{Deserialize, Serialize};

use crate::common::helpers::de_lenient_f64;

// ============================================================================
// Loan Product Models
// ============================================================================

/// A loan product offered on the platform. Numeric fields arrive as either
/// numbers or stringified numbers depending on how the record was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(rename = "_id")]
    pub id: String,
    pub loan_title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub interest_rate: f64,
    #[serde(default, deserialize_with = "de_lenient_f64")]
    pub max_loan_limit: f64,
    #[serde(default)]
    pub required_documents: Option<String>,
    #[serde(default)]
    pub emi_plans: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub show_on_home: bool,
    #[serde(default)]
    pub manager_email: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for creating a loan product (manager action). The image has
/// already been pushed to the image host; `image` is its hosted URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    pub loan_title: String,
    pub description: String,
    pub category: String,
    pub interest_rate: f64,
    pub max_loan_limit: f64,
    pub required_documents: Option<String>,
    pub emi_plans: Option<String>,
    pub image: Option<String>,
    pub show_on_home: bool,
    pub manager_email: String,
    pub created_by: String,
    pub created_at: String,
}

/// Partial loan edit (admin action). Only supplied fields are patched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_loan_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_documents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_plans: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// The paginated list endpoint historically returned a bare array; newer
/// deployments return an object with pagination metadata. Both are accepted
/// and normalized by `LoanClient::list`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LoanPage {
    Paged {
        loans: Vec<Loan>,
        #[serde(rename = "totalPages")]
        total_pages: u32,
    },
    All(Vec<Loan>),
}

/// Normalized page of loan products.
#[derive(Debug)]
pub struct LoanListing {
    pub loans: Vec<Loan>,
    pub total_pages: u32,
}

impl LoanPage {
    /// Normalizes to the requested page, slicing client-side when the
    /// backend returned the full array.
    pub fn into_listing(self, page: u32, limit: u32) -> LoanListing {
        match self {
            LoanPage::Paged { loans, total_pages } => LoanListing { loans, total_pages },
            LoanPage::All(all) => {
                let limit = limit.max(1) as usize;
                let total_pages = all.len().div_ceil(limit) as u32;
                let start = (page.max(1) as usize - 1) * limit;
                let loans = all.into_iter().skip(start).take(limit).collect();
                LoanListing { loans, total_pages }
            }
        }
    }

    /// Flattens to the full product list regardless of response shape.
    pub fn into_all(self) -> Vec<Loan> {
        match self {
            LoanPage::Paged { loans, .. } => loans,
            LoanPage::All(all) => all,
        }
    }
}
