// Error handling types for the client

use thiserror::Error;

use super::validation::ValidationResult;
use crate::auth::provider::ProviderError;

/// Client error taxonomy
///
/// Everything a session, role, or API operation can surface to a caller.
/// `AuthExpired` is derived locally from a 401/403 response and is always
/// accompanied by the one-shot forced-logout flow in the request client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("session expired")]
    AuthExpired,

    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("role lookup failed: {0}")]
    RoleLookup(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("preference store error: {0}")]
    Prefs(String),
}

impl ClientError {
    /// True for errors the caller may present as transient (network blips,
    /// 5xx) as opposed to rejections that will repeat on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Network(_) => true,
            ClientError::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<ValidationResult> for ClientError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ClientError::Validation("validation result was valid but converted to error".into())
        } else {
            let messages: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            ClientError::Validation(messages.join(", "))
        }
    }
}
