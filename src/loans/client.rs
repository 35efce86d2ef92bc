// Loan product operations

use std::sync::Arc;

use tracing::info;

use super::models::{Loan, LoanListing, LoanPage, LoanUpdate, NewLoan};
use super::validators::NewLoanValidator;
use crate::api::{ApiClient, DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::common::{ClientError, Validator};

/// Typed operations on `/loans`.
#[derive(Clone)]
pub struct LoanClient {
    api: Arc<ApiClient>,
}

impl LoanClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// GET /loans?page=&limit= - paginated catalog listing
    pub async fn list(&self, page: u32, limit: u32) -> Result<LoanListing, ClientError> {
        let path = format!("/loans?page={}&limit={}", page, limit);
        let response: LoanPage = self.api.get(&path).await?;
        Ok(response.into_listing(page, limit))
    }

    /// GET /loans - full product list (admin and manager views)
    pub async fn list_all(&self) -> Result<Vec<Loan>, ClientError> {
        let response: LoanPage = self.api.get("/loans").await?;
        Ok(response.into_all())
    }

    /// GET /loans/all-loans/{id} - single product detail
    pub async fn detail(&self, id: &str) -> Result<Loan, ClientError> {
        self.api.get(&format!("/loans/all-loans/{}", id)).await
    }

    /// POST /loans - create a product (manager). Returns the new record id.
    pub async fn create(&self, loan: &NewLoan) -> Result<String, ClientError> {
        let validation = NewLoanValidator.validate(loan);
        if !validation.is_valid {
            return Err(validation.into());
        }
        let outcome: InsertOutcome = self.api.post("/loans", loan).await?;
        info!(loan_id = %outcome.inserted_id, "Loan product created");
        Ok(outcome.inserted_id)
    }

    /// PATCH /loans/edit-loan/{id} - edit a product (admin)
    pub async fn edit(&self, id: &str, update: &LoanUpdate) -> Result<(), ClientError> {
        let _: UpdateOutcome = self
            .api
            .patch(&format!("/loans/edit-loan/{}", id), update)
            .await?;
        Ok(())
    }

    /// PATCH /loans/{id} - toggle home-page visibility (admin)
    pub async fn set_show_on_home(&self, id: &str, show_on_home: bool) -> Result<bool, ClientError> {
        let body = serde_json::json!({ "showOnHome": show_on_home });
        let outcome: UpdateOutcome = self.api.patch(&format!("/loans/{}", id), &body).await?;
        Ok(outcome.changed())
    }

    /// DELETE /loans/{id}
    pub async fn delete(&self, id: &str) -> Result<bool, ClientError> {
        let outcome: DeleteOutcome = self.api.delete(&format!("/loans/{}", id)).await?;
        Ok(outcome.deleted())
    }
}
