// Identity provider seam

use async_trait::async_trait;
use thiserror::Error;

use super::models::{AuthedIdentity, FederatedProvider, Identity, ProfileUpdate, TokenPair};

/// Identity-provider operation failures. Surfaced as transient user
/// notifications at the call site; never fatal to the app.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("email already in use")]
    EmailInUse,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("weak password: {0}")]
    WeakPassword(String),

    #[error("account disabled")]
    UserDisabled,

    #[error("not signed in")]
    NotAuthenticated,

    #[error("sign-in window closed before completing")]
    PopupClosed,

    #[error("session token expired")]
    TokenExpired,

    #[error("recent login required for this operation")]
    RequiresRecentLogin,

    #[error("identity provider misconfigured: {0}")]
    Misconfigured(String),

    #[error("identity provider request failed: {0}")]
    RequestFailed(String),

    #[error("unexpected identity provider response: {0}")]
    UnexpectedResponse(String),
}

/// Operations the session store needs from the hosted identity provider.
///
/// The production implementation is `services::identity::IdentityToolkitClient`;
/// tests substitute an in-memory double. Federated sign-in takes the OAuth
/// access token produced by the interactive popup, which happens outside
/// this crate.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn register(&self, email: &str, password: &str) -> Result<AuthedIdentity, ProviderError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthedIdentity, ProviderError>;

    async fn login_federated(
        &self,
        provider: FederatedProvider,
        oauth_token: &str,
    ) -> Result<AuthedIdentity, ProviderError>;

    /// Exchanges a refresh token for a fresh id token. Called once per
    /// outgoing API request so credentials are never sent stale.
    async fn refresh_id_token(&self, refresh_token: &str) -> Result<TokenPair, ProviderError>;

    /// Resolves the identity behind an id token (session restore).
    async fn lookup(&self, id_token: &str) -> Result<Identity, ProviderError>;

    async fn update_profile(
        &self,
        id_token: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ProviderError>;

    /// Irreversible. The provider may demand re-authentication, surfaced as
    /// `ProviderError::RequiresRecentLogin`.
    async fn delete_account(&self, id_token: &str) -> Result<(), ProviderError>;
}
