// Authenticated request client for the LoanLink REST API

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::{ProviderError, SessionStore};
use crate::common::nav::paths;
use crate::common::{ClientError, Navigator, Notifier};

/// Wraps every outbound backend call.
///
/// When a session identity exists, a fresh token is fetched from the
/// provider and attached as a bearer credential per request; signed-out
/// requests go out unauthenticated. A 401/403 response forces logout,
/// redirects to the login entry point, and notifies the user, exactly once
/// per session epoch, no matter how many in-flight requests fail together.
/// Every other failure passes through to the caller unmodified.
///
/// Owned by the bootstrap context, so the interception logic lives exactly
/// once for the process lifetime.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
    navigator: Navigator,
    notifier: Notifier,
    expired_epoch: AtomicU64,
}

/// Error body shape the backend uses for 4xx/5xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        navigator: Navigator,
        notifier: Notifier,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
            navigator,
            notifier,
            expired_epoch: AtomicU64::new(0),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(to_body(body)?)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PATCH, path, Some(to_body(body)?))
            .await
    }

    /// PATCH with no request body (payment confirmation).
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(Method::PATCH, path, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(Method::DELETE, path, None).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let epoch = self.session.epoch();
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("x-request-id", Uuid::new_v4().to_string());

        // Fresh token per request; never a cached credential.
        match self.session.fresh_token().await {
            Ok(Some(token)) => {
                request = request.bearer_auth(token);
            }
            Ok(None) => {}
            Err(ProviderError::TokenExpired) => {
                self.expire_session(epoch).await;
                return Err(ClientError::AuthExpired);
            }
            Err(e) => return Err(ClientError::Provider(e)),
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%method, path, status = %status, "Request rejected by backend auth");
            self.expire_session(epoch).await;
            return Err(ClientError::AuthExpired);
        }

        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            };
            return Err(ClientError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        debug!(%method, path, status = %status, "Request completed");
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Forced sign-out after an auth rejection. The epoch high-water mark
    /// makes this single-shot: concurrent rejections from the same session
    /// collapse into one logout, one redirect, one notification.
    async fn expire_session(&self, epoch: u64) {
        if self.expired_epoch.fetch_max(epoch, Ordering::SeqCst) >= epoch {
            return;
        }
        warn!("Session expired, forcing sign-out");
        self.session.logout().await;
        self.navigator.go(paths::LOGIN);
        self.notifier.error("Session expired. Please login again.");
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}
