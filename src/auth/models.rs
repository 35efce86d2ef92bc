// Authentication data models

use serde::{Deserialize, Serialize};

/// The authenticated principal as mirrored from the identity provider.
///
/// Read-only to this codebase: the provider owns the record, the session
/// store owns the only mutable reference to this projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
}

/// Ephemeral client-side projection of the authentication state.
///
/// `loading` is true from construction until the first provider notification
/// (restored session or signed-out), and again for the duration of any
/// in-flight identity operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl Session {
    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.email.as_str())
    }
}

/// Federated sign-in providers supported by the login and register flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
    GitHub,
}

impl FederatedProvider {
    /// Provider id in the identity-toolkit wire format.
    pub fn provider_id(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "google.com",
            FederatedProvider::GitHub => "github.com",
        }
    }
}

impl std::fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FederatedProvider::Google => write!(f, "Google"),
            FederatedProvider::GitHub => write!(f, "GitHub"),
        }
    }
}

/// Partial profile mutation. Only the display name and avatar are writable;
/// the backend user record is synced separately by the caller.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Token pair held for the current identity. The id token is rotated on
/// every request; the refresh token is rotated whenever the provider
/// returns a replacement.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub id_token: String,
    pub refresh_token: String,
}

/// Result of a successful provider sign-in or registration.
#[derive(Debug, Clone)]
pub struct AuthedIdentity {
    pub identity: Identity,
    pub tokens: TokenPair,
}
