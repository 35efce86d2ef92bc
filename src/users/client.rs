// User record operations

use std::sync::Arc;

use chrono::Local;
use tracing::info;

use super::models::{NewUserRecord, UserRecord};
use crate::api::{ApiClient, UpdateOutcome};
use crate::common::{safe_email_log, ClientError};
use crate::roles::Role;

/// Typed operations on `/users`.
#[derive(Clone)]
pub struct UserClient {
    api: Arc<ApiClient>,
}

impl UserClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// POST /users - persist the backend record for a freshly registered
    /// identity.
    pub async fn create(&self, record: &NewUserRecord) -> Result<(), ClientError> {
        let _: serde_json::Value = self.api.post("/users", record).await?;
        info!(email = %safe_email_log(&record.email), "User record created");
        Ok(())
    }

    /// GET /users - full directory (admin).
    pub async fn list(&self) -> Result<Vec<UserRecord>, ClientError> {
        self.api.get("/users").await
    }

    /// GET /users/{id}
    pub async fn get(&self, id: &str) -> Result<UserRecord, ClientError> {
        self.api.get(&format!("/users/{}", id)).await
    }

    /// GET /users?email= - the signed-in user's own record (profile page).
    pub async fn find_by_email(&self, email: &str) -> Result<UserRecord, ClientError> {
        self.api
            .get(&format!("/users?email={}", urlencoding::encode(email)))
            .await
    }

    /// PATCH /users/{id} - admin role change.
    pub async fn set_role(&self, id: &str, role: Role) -> Result<bool, ClientError> {
        let body = serde_json::json!({
            "role": role,
            "updatedAt": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        let outcome: UpdateOutcome = self.api.patch(&format!("/users/{}", id), &body).await?;
        if outcome.changed() {
            info!(user_id = %id, role = %role, "User role updated");
        }
        Ok(outcome.changed())
    }

    /// PATCH /users/{id} - approve a pending account (status -> active).
    pub async fn approve(&self, id: &str) -> Result<bool, ClientError> {
        let body = serde_json::json!({
            "status": "active",
            "activatedAt": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        let outcome: UpdateOutcome = self.api.patch(&format!("/users/{}", id), &body).await?;
        if outcome.changed() {
            info!(user_id = %id, "User approved and activated");
        }
        Ok(outcome.changed())
    }

    /// PATCH /users/{id} - suspend an account with a reason and optional
    /// feedback for the user.
    pub async fn suspend(
        &self,
        id: &str,
        reason: &str,
        feedback: Option<&str>,
    ) -> Result<bool, ClientError> {
        if reason.trim().is_empty() {
            return Err(ClientError::Validation(
                "suspendReason: a reason is required to suspend an account".into(),
            ));
        }
        let body = serde_json::json!({
            "status": "suspended",
            "rejectedAt": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            "suspendReason": reason,
            "suspendFeedback": feedback.unwrap_or_default(),
        });
        let outcome: UpdateOutcome = self.api.patch(&format!("/users/{}", id), &body).await?;
        if outcome.changed() {
            info!(user_id = %id, "User suspended");
        }
        Ok(outcome.changed())
    }
}
