// Session store: the single writer of authentication state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::models::{
    AuthedIdentity, FederatedProvider, Identity, ProfileUpdate, Session, TokenPair,
};
use super::provider::{IdentityProvider, ProviderError};
use crate::common::safe_email_log;

/// Process-wide authentication state.
///
/// Constructed once at bootstrap and passed by reference; all session
/// mutation funnels through here, observers hold `watch` receivers. Every
/// operation flips `loading` on synchronously before its first await, so a
/// concurrently evaluated guard sees a loading state rather than a stale
/// pre-operation identity, and every completion path (success or failure)
/// leaves `loading` off again.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<Session>,
    tokens: Mutex<Option<TokenPair>>,
    epoch: AtomicU64,
}

impl SessionStore {
    /// Starts in `{identity: None, loading: true}`; `bootstrap` delivers the
    /// first notification and flips `loading` off.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(Session {
            identity: None,
            loading: true,
        });
        Self {
            provider,
            state,
            tokens: Mutex::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    /// Read-only subscription to session changes. Dropping the receiver is
    /// the unsubscribe.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Monotonic counter bumped on every identity change (sign-in, sign-out,
    /// restore). Consumers use it to discard results resolved against a
    /// previous identity.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Restores a previous session from a stored refresh token, or settles
    /// into the signed-out state. Must be called exactly once after
    /// construction; until it completes the session reports `loading`.
    pub async fn bootstrap(&self, stored_refresh_token: Option<String>) {
        let restored = match stored_refresh_token {
            Some(refresh_token) => match self.provider.refresh_id_token(&refresh_token).await {
                Ok(tokens) => match self.provider.lookup(&tokens.id_token).await {
                    Ok(identity) => Some(AuthedIdentity { identity, tokens }),
                    Err(e) => {
                        warn!(error = %e, "Stored session lookup failed, starting signed out");
                        None
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Stored refresh token rejected, starting signed out");
                    None
                }
            },
            None => None,
        };

        match restored {
            Some(authed) => {
                info!(email = %safe_email_log(&authed.identity.email), "Session restored");
                self.establish(authed);
            }
            None => self.clear_identity(),
        }
    }

    pub async fn register_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        self.begin();
        match self.provider.register(email, password).await {
            Ok(authed) => {
                info!(email = %safe_email_log(email), "Account registered");
                Ok(self.establish(authed))
            }
            Err(e) => {
                warn!(email = %safe_email_log(email), error = %e, "Registration failed");
                self.settle();
                Err(e)
            }
        }
    }

    pub async fn login_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        self.begin();
        match self.provider.login(email, password).await {
            Ok(authed) => {
                info!(email = %safe_email_log(&authed.identity.email), "Signed in");
                Ok(self.establish(authed))
            }
            Err(e) => {
                warn!(email = %safe_email_log(email), error = %e, "Sign-in failed");
                self.settle();
                Err(e)
            }
        }
    }

    /// Completes a federated sign-in from the OAuth access token produced by
    /// the provider popup (the popup itself happens outside this crate).
    pub async fn login_with_federated_provider(
        &self,
        federated: FederatedProvider,
        oauth_token: &str,
    ) -> Result<Identity, ProviderError> {
        self.begin();
        match self.provider.login_federated(federated, oauth_token).await {
            Ok(authed) => {
                info!(
                    provider = %federated,
                    email = %safe_email_log(&authed.identity.email),
                    "Federated sign-in complete"
                );
                Ok(self.establish(authed))
            }
            Err(e) => {
                warn!(provider = %federated, error = %e, "Federated sign-in failed");
                self.settle();
                Err(e)
            }
        }
    }

    /// Clears the local identity. Idempotent: a second call leaves the same
    /// terminal state `{identity: None, loading: false}`.
    pub async fn logout(&self) {
        self.begin();
        self.clear_identity();
        debug!("Signed out");
    }

    /// Mutates display name / avatar on the provider side only; syncing the
    /// backend user record stays the caller's responsibility.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Identity, ProviderError> {
        self.begin();
        let id_token = match self.current_id_token() {
            Some(t) => t,
            None => {
                self.settle();
                return Err(ProviderError::NotAuthenticated);
            }
        };

        match self.provider.update_profile(&id_token, update).await {
            Ok(()) => {
                let mut updated = None;
                self.state.send_modify(|s| {
                    if let Some(identity) = s.identity.as_mut() {
                        if let Some(name) = &update.display_name {
                            identity.display_name = Some(name.clone());
                        }
                        if let Some(url) = &update.photo_url {
                            identity.photo_url = Some(url.clone());
                        }
                        updated = Some(identity.clone());
                    }
                    s.loading = false;
                });
                updated.ok_or(ProviderError::NotAuthenticated)
            }
            Err(e) => {
                warn!(error = %e, "Profile update failed");
                self.settle();
                Err(e)
            }
        }
    }

    /// Irreversible account deletion. On success the session ends up in the
    /// signed-out terminal state.
    pub async fn delete_account(&self) -> Result<(), ProviderError> {
        self.begin();
        let id_token = match self.current_id_token() {
            Some(t) => t,
            None => {
                self.settle();
                return Err(ProviderError::NotAuthenticated);
            }
        };

        match self.provider.delete_account(&id_token).await {
            Ok(()) => {
                info!("Account deleted");
                self.clear_identity();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Account deletion failed");
                self.settle();
                Err(e)
            }
        }
    }

    /// Fresh, non-cached bearer token for an outgoing request, or `None`
    /// when signed out. Each call performs a refresh-token exchange so a
    /// request never carries an expired credential. A rotated pair is only
    /// stored if the identity has not changed in the meantime.
    pub async fn fresh_token(&self) -> Result<Option<String>, ProviderError> {
        let (refresh_token, epoch) = {
            let guard = self.tokens.lock().expect("session token lock poisoned");
            match guard.as_ref() {
                Some(pair) => (pair.refresh_token.clone(), self.epoch()),
                None => return Ok(None),
            }
        };

        let fresh = self.provider.refresh_id_token(&refresh_token).await?;

        let mut guard = self.tokens.lock().expect("session token lock poisoned");
        if self.epoch() == epoch {
            *guard = Some(fresh.clone());
        }
        Ok(Some(fresh.id_token))
    }

    fn begin(&self) {
        self.state.send_modify(|s| s.loading = true);
    }

    fn settle(&self) {
        self.state.send_modify(|s| s.loading = false);
    }

    fn establish(&self, authed: AuthedIdentity) -> Identity {
        *self.tokens.lock().expect("session token lock poisoned") = Some(authed.tokens);
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let identity = authed.identity.clone();
        self.state.send_modify(|s| {
            s.identity = Some(authed.identity);
            s.loading = false;
        });
        identity
    }

    fn clear_identity(&self) {
        *self.tokens.lock().expect("session token lock poisoned") = None;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| {
            s.identity = None;
            s.loading = false;
        });
    }

    fn current_id_token(&self) -> Option<String> {
        self.tokens
            .lock()
            .expect("session token lock poisoned")
            .as_ref()
            .map(|pair| pair.id_token.clone())
    }
}
