// src/users/models.rs

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::auth::Identity;
use crate::roles::{AccountStatus, Role};

// ============================================================================
// User Record Models
// ============================================================================

/// Backend user record, keyed by email. Created on first registration;
/// mutated only by admin actions. The guard/resolver layer reads it, never
/// writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    #[serde(default)]
    pub requested_role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub activated_at: Option<String>,
    #[serde(default)]
    pub rejected_at: Option<String>,
    #[serde(default)]
    pub suspend_reason: Option<String>,
    #[serde(default)]
    pub suspend_feedback: Option<String>,
}

/// Payload saved after a successful provider registration or first
/// federated sign-in. Every account starts as a `user`; requesting the
/// manager role parks the account in `pending` until an admin approves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRecord {
    pub email: String,
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub requested_role: Role,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: String,
}

impl NewUserRecord {
    pub fn from_identity(identity: &Identity, requested_role: Role) -> Self {
        let status = if requested_role == Role::Manager {
            AccountStatus::Pending
        } else {
            AccountStatus::Active
        };
        Self {
            email: identity.email.to_lowercase(),
            name: identity
                .display_name
                .clone()
                .unwrap_or_else(|| "Anonymous User".to_string()),
            photo_url: identity.photo_url.clone(),
            requested_role,
            role: Role::User,
            status,
            created_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
