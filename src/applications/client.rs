// Loan application operations

use std::sync::Arc;

use tracing::info;

use super::models::{
    ApplicationFilter, ApplicationStatus, LoanApplication, NewLoanApplication, StatusPatch,
};
use super::validators::ApplicationValidator;
use crate::api::{ApiClient, InsertOutcome, UpdateOutcome};
use crate::common::{safe_email_log, ClientError, Validator};

/// Typed operations on `/loanApplication`.
#[derive(Clone)]
pub struct ApplicationClient {
    api: Arc<ApiClient>,
}

impl ApplicationClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// POST /loanApplication - submit a new application. Returns the record id.
    pub async fn submit(&self, application: &NewLoanApplication) -> Result<String, ClientError> {
        let validation = ApplicationValidator.validate(application);
        if !validation.is_valid {
            return Err(validation.into());
        }
        let outcome: InsertOutcome = self.api.post("/loanApplication", application).await?;
        info!(
            application_id = %outcome.inserted_id,
            email = %safe_email_log(&application.user_email),
            "Loan application submitted"
        );
        Ok(outcome.inserted_id)
    }

    /// GET /loanApplication with optional email/status filters.
    pub async fn list(&self, filter: &ApplicationFilter) -> Result<Vec<LoanApplication>, ClientError> {
        let path = format!("/loanApplication{}", filter.to_query());
        self.api.get(&path).await
    }

    /// GET /loanApplications - every application (manager dashboard).
    pub async fn list_all(&self) -> Result<Vec<LoanApplication>, ClientError> {
        self.api.get("/loanApplications").await
    }

    /// PATCH /loanApplication/{id} - move an application to `status`.
    /// Returns whether the backend actually changed the record.
    pub async fn set_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<bool, ClientError> {
        let body = StatusPatch {
            current_status: status,
        };
        let outcome: UpdateOutcome = self
            .api
            .patch(&format!("/loanApplication/{}", id), &body)
            .await?;
        if outcome.changed() {
            info!(application_id = %id, status = %status, "Application status updated");
        }
        Ok(outcome.changed())
    }

    /// Manager approval.
    pub async fn approve(&self, id: &str) -> Result<bool, ClientError> {
        self.set_status(id, ApplicationStatus::Approved).await
    }

    /// Manager rejection.
    pub async fn reject(&self, id: &str) -> Result<bool, ClientError> {
        self.set_status(id, ApplicationStatus::Rejected).await
    }

    /// Borrower cancellation.
    pub async fn cancel(&self, id: &str) -> Result<bool, ClientError> {
        self.set_status(id, ApplicationStatus::Cancelled).await
    }

    /// Borrower re-submission of a cancelled application.
    pub async fn resubmit(&self, id: &str) -> Result<bool, ClientError> {
        self.set_status(id, ApplicationStatus::Pending).await
    }
}
