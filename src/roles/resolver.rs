// Role resolution against the backend, cached per identity

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::{Role, RoleLookupResponse, RoleState};
use crate::api::ApiClient;
use crate::auth::SessionStore;
use crate::common::{safe_email_log, ClientError};

struct CacheEntry {
    email: String,
    state: RoleState,
}

/// Derives the authorization role for the current session identity by
/// querying the backend keyed on the identity's email.
///
/// A signed-out session resolves to `user` without a fetch; guards must
/// never deadlock waiting for a role that has no record behind it. Results
/// are cached for as long as the session email stays the same; a lookup
/// that resolves after the session moved to a different identity is
/// discarded rather than cached.
pub struct RoleResolver {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    cache: RwLock<Option<CacheEntry>>,
}

impl RoleResolver {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            cache: RwLock::new(None),
        }
    }

    /// Non-blocking snapshot: `Loading` until a lookup for the current email
    /// has completed, the cached outcome afterwards.
    pub fn role_state(&self) -> RoleState {
        let email = match self.session.current().identity {
            Some(identity) => identity.email,
            None => return RoleState::Resolved(Role::User),
        };

        let cache = self.cache.read().expect("role cache lock poisoned");
        match cache.as_ref() {
            Some(entry) if entry.email == email => entry.state.clone(),
            _ => RoleState::Loading,
        }
    }

    /// Resolves the role for the current identity, fetching on a cache miss.
    /// Lookup failures are cached as `Failed` and not retried until the
    /// identity changes or `invalidate` is called.
    pub async fn resolve(&self) -> RoleState {
        let email = match self.session.current().identity {
            Some(identity) => identity.email,
            None => return RoleState::Resolved(Role::User),
        };

        {
            let cache = self.cache.read().expect("role cache lock poisoned");
            if let Some(entry) = cache.as_ref() {
                if entry.email == email {
                    return entry.state.clone();
                }
            }
        }

        let path = format!("/users/role/{}", urlencoding::encode(&email));
        let state = match self.api.get::<RoleLookupResponse>(&path).await {
            Ok(response) => {
                debug!(email = %safe_email_log(&email), role = %response.role, "Role resolved");
                RoleState::Resolved(response.role)
            }
            Err(e) => {
                warn!(email = %safe_email_log(&email), error = %e, "Role lookup failed");
                RoleState::Failed(e.to_string())
            }
        };

        // A lookup racing a sign-out or a new sign-in must not poison the
        // next identity's cache.
        let still_current = self
            .session
            .current()
            .identity
            .map(|i| i.email == email)
            .unwrap_or(false);
        if !still_current {
            debug!(email = %safe_email_log(&email), "Discarding role lookup for stale identity");
            return self.role_state();
        }

        *self.cache.write().expect("role cache lock poisoned") = Some(CacheEntry {
            email,
            state: state.clone(),
        });
        state
    }

    /// Strict variant for callers that need a definite role: an unresolved
    /// or failed lookup becomes an error instead of a state.
    pub async fn require(&self) -> Result<Role, ClientError> {
        match self.resolve().await {
            RoleState::Resolved(role) => Ok(role),
            RoleState::Failed(reason) => Err(ClientError::RoleLookup(reason)),
            RoleState::Loading => Err(ClientError::RoleLookup("lookup not started".into())),
        }
    }

    /// Drops the cached state so the next `resolve` fetches again.
    pub fn invalidate(&self) {
        *self.cache.write().expect("role cache lock poisoned") = None;
    }
}
