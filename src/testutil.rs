// Shared test doubles: in-memory identity provider and loopback backend stubs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::auth::models::{
    AuthedIdentity, FederatedProvider, Identity, ProfileUpdate, TokenPair,
};
use crate::auth::provider::{IdentityProvider, ProviderError};
use crate::common::{AppConfig, AppContext, AppStreams};

#[derive(Clone)]
struct MockAccount {
    password: String,
    identity: Identity,
}

/// In-memory identity provider. Accounts are keyed by lowercased email;
/// token strings are sequential so tests can assert per-request freshness.
pub struct MockProvider {
    accounts: Mutex<HashMap<String, MockAccount>>,
    restore: Mutex<Option<Identity>>,
    pub refresh_calls: AtomicUsize,
    pub fail_refresh: AtomicBool,
    pub delete_requires_recent_login: AtomicBool,
    login_gate: Mutex<Option<Arc<Notify>>>,
    token_counter: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            accounts: Mutex::new(HashMap::new()),
            restore: Mutex::new(None),
            refresh_calls: AtomicUsize::new(0),
            fail_refresh: AtomicBool::new(false),
            delete_requires_recent_login: AtomicBool::new(false),
            login_gate: Mutex::new(None),
            token_counter: AtomicUsize::new(0),
        })
    }

    pub fn add_account(&self, email: &str, password: &str, display_name: Option<&str>) {
        let identity = Identity {
            uid: format!("uid-{}", email.to_lowercase()),
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
            photo_url: None,
            email_verified: false,
        };
        self.accounts.lock().unwrap().insert(
            email.to_lowercase(),
            MockAccount {
                password: password.to_string(),
                identity,
            },
        );
    }

    /// Identity returned by `lookup` during session restore.
    pub fn set_restorable(&self, email: &str) {
        *self.restore.lock().unwrap() = Some(Identity {
            uid: format!("uid-{}", email.to_lowercase()),
            email: email.to_string(),
            display_name: None,
            photo_url: None,
            email_verified: true,
        });
    }

    /// Makes `login` block until the returned handle is notified, so tests
    /// can observe the in-flight loading state.
    pub fn gate_logins(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.login_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn next_tokens(&self) -> TokenPair {
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst) + 1;
        TokenPair {
            id_token: format!("id-token-{}", n),
            refresh_token: format!("refresh-token-{}", n),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockProvider {
    async fn register(&self, email: &str, password: &str) -> Result<AuthedIdentity, ProviderError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&email.to_lowercase()) {
            return Err(ProviderError::EmailInUse);
        }
        let identity = Identity {
            uid: format!("uid-{}", email.to_lowercase()),
            email: email.to_string(),
            display_name: None,
            photo_url: None,
            email_verified: false,
        };
        accounts.insert(
            email.to_lowercase(),
            MockAccount {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        drop(accounts);
        Ok(AuthedIdentity {
            identity,
            tokens: self.next_tokens(),
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthedIdentity, ProviderError> {
        let gate = self.login_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let account = self
            .accounts
            .lock()
            .unwrap()
            .get(&email.to_lowercase())
            .cloned()
            .ok_or(ProviderError::InvalidCredentials)?;
        if account.password != password {
            return Err(ProviderError::InvalidCredentials);
        }
        Ok(AuthedIdentity {
            identity: account.identity,
            tokens: self.next_tokens(),
        })
    }

    async fn login_federated(
        &self,
        provider: FederatedProvider,
        oauth_token: &str,
    ) -> Result<AuthedIdentity, ProviderError> {
        if oauth_token.is_empty() {
            return Err(ProviderError::PopupClosed);
        }
        let email = format!("{}@{}", oauth_token, provider.provider_id());
        let identity = Identity {
            uid: format!("uid-{}", email),
            email,
            display_name: Some(oauth_token.to_string()),
            photo_url: None,
            email_verified: true,
        };
        Ok(AuthedIdentity {
            identity,
            tokens: self.next_tokens(),
        })
    }

    async fn refresh_id_token(&self, refresh_token: &str) -> Result<TokenPair, ProviderError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_refresh.load(Ordering::SeqCst) {
            return Err(ProviderError::TokenExpired);
        }
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TokenPair {
            id_token: format!("fresh-{}", n),
            refresh_token: refresh_token.to_string(),
        })
    }

    async fn lookup(&self, _id_token: &str) -> Result<Identity, ProviderError> {
        self.restore
            .lock()
            .unwrap()
            .clone()
            .ok_or(ProviderError::TokenExpired)
    }

    async fn update_profile(
        &self,
        _id_token: &str,
        _update: &ProfileUpdate,
    ) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn delete_account(&self, _id_token: &str) -> Result<(), ProviderError> {
        if self.delete_requires_recent_login.load(Ordering::SeqCst) {
            return Err(ProviderError::RequiresRecentLogin);
        }
        Ok(())
    }
}

/// Serves `router` on a loopback port, returning its base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{}", addr)
}

pub fn test_config(api_base_url: &str) -> AppConfig {
    AppConfig {
        api_base_url: api_base_url.to_string(),
        identity_base_url: "http://127.0.0.1:1".to_string(),
        token_base_url: "http://127.0.0.1:1".to_string(),
        identity_api_key: "test-key".to_string(),
        image_host_url: "http://127.0.0.1:1".to_string(),
        image_host_key: None,
        prefs_path: std::env::temp_dir().join("loanlink-test-prefs.json"),
    }
}

/// Context wired to the mock provider and a stub backend, session already
/// settled into the signed-out state.
pub async fn test_context(
    api_base_url: &str,
    provider: Arc<MockProvider>,
) -> (AppContext, AppStreams) {
    let (context, streams) =
        AppContext::with_provider(test_config(api_base_url), provider, reqwest::Client::new());
    context.session.bootstrap(None).await;
    (context, streams)
}
