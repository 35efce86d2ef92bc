//! # Roles Module
//!
//! Authorization vocabulary and the role resolver:
//! - `Role`: closed role enum (no dynamic string comparison at call sites)
//! - `RoleState`: loading / resolved / failed lookup state for the current
//!   identity, consumed by the route guards
//! - `RoleResolver`: backend lookup keyed on the session email, cached per
//!   identity

pub mod resolver;


use serde::{Deserialize, Serialize};

pub use resolver::RoleResolver;

/// Authorization role attached to a backend user record. Defaults to `User`
/// until an admin promotes the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend account status. New borrower accounts are `active`; accounts
/// requesting the manager role start `pending` until approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Suspended,
    Pending,
}

/// Role resolution state for the current identity.
///
/// A failed lookup is its own state: it must never be mistaken for
/// "resolved as user" (that would silently grant borrower access) nor for
/// a grant of anything higher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleState {
    Loading,
    Resolved(Role),
    Failed(String),
}

impl RoleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RoleState::Loading)
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            RoleState::Resolved(role) => Some(*role),
            _ => None,
        }
    }
}

/// Wire shape of `GET /users/role/{email}`.
#[derive(Debug, Deserialize)]
pub struct RoleLookupResponse {
    pub role: Role,
}
