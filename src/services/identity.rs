// src/services/identity.rs
//
// HTTP implementation of the IdentityProvider seam against the hosted
// identity-toolkit REST API: credential and federated sign-in, account
// lookup/update/delete, and refresh-token exchange.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::models::{
    AuthedIdentity, FederatedProvider, Identity, ProfileUpdate, TokenPair,
};
use crate::auth::provider::{IdentityProvider, ProviderError};
use crate::common::{safe_email_log, safe_token_log, AppConfig};

#[derive(Debug, Clone)]
pub struct IdentityToolkitClient {
    client: Client,
    base_url: String,
    token_url: String,
    api_key: String,
}

// Account endpoints speak camelCase; the token endpoint speaks snake_case.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    email_verified: bool,
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl IdentityToolkitClient {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            base_url: config.identity_base_url.clone(),
            token_url: config.token_base_url.clone(),
            api_key: config.identity_api_key.clone(),
        }
    }

    async fn post_accounts<T: serde::de::DeserializeOwned>(
        &self,
        action: &str,
        body: &serde_json::Value,
    ) -> Result<T, ProviderError> {
        let url = format!("{}/accounts:{}?key={}", self.base_url, action, self.api_key);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(action, status = %status, "Identity provider rejected request");
            return Err(map_provider_error(&error_text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))
    }

    fn authed(response: AccountResponse) -> AuthedIdentity {
        AuthedIdentity {
            identity: Identity {
                uid: response.local_id,
                email: response.email,
                display_name: response.display_name,
                photo_url: response.photo_url,
                email_verified: response.email_verified,
            },
            tokens: TokenPair {
                id_token: response.id_token,
                refresh_token: response.refresh_token,
            },
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitClient {
    async fn register(&self, email: &str, password: &str) -> Result<AuthedIdentity, ProviderError> {
        debug!(email = %safe_email_log(email), "Registering account");
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let response: AccountResponse = self.post_accounts("signUp", &body).await?;
        Ok(Self::authed(response))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthedIdentity, ProviderError> {
        debug!(email = %safe_email_log(email), "Password sign-in");
        let body = json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });
        let response: AccountResponse = self.post_accounts("signInWithPassword", &body).await?;
        Ok(Self::authed(response))
    }

    async fn login_federated(
        &self,
        provider: FederatedProvider,
        oauth_token: &str,
    ) -> Result<AuthedIdentity, ProviderError> {
        debug!(provider = %provider, "Federated sign-in");
        let post_body = format!(
            "access_token={}&providerId={}",
            urlencoding::encode(oauth_token),
            provider.provider_id()
        );
        let body = json!({
            "postBody": post_body,
            "requestUri": "http://localhost",
            "returnSecureToken": true,
            "returnIdpCredential": true,
        });
        let response: AccountResponse = self.post_accounts("signInWithIdp", &body).await?;
        Ok(Self::authed(response))
    }

    async fn refresh_id_token(&self, refresh_token: &str) -> Result<TokenPair, ProviderError> {
        let url = format!("{}/token?key={}", self.token_url, self.api_key);
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(
                status = %status,
                refresh_token = %safe_token_log(refresh_token),
                "Token refresh rejected"
            );
            return Err(map_provider_error(&error_text));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))?;
        Ok(TokenPair {
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
        })
    }

    async fn lookup(&self, id_token: &str) -> Result<Identity, ProviderError> {
        let body = json!({ "idToken": id_token });
        let response: LookupResponse = self.post_accounts("lookup", &body).await?;
        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::UnexpectedResponse("empty account lookup".into()))?;
        Ok(Identity {
            uid: user.local_id,
            email: user.email.unwrap_or_default(),
            display_name: user.display_name,
            photo_url: user.photo_url,
            email_verified: user.email_verified,
        })
    }

    async fn update_profile(
        &self,
        id_token: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ProviderError> {
        let mut body = json!({
            "idToken": id_token,
            "returnSecureToken": false,
        });
        if let Some(name) = &update.display_name {
            body["displayName"] = json!(name);
        }
        if let Some(url) = &update.photo_url {
            body["photoUrl"] = json!(url);
        }
        let _: serde_json::Value = self.post_accounts("update", &body).await?;
        Ok(())
    }

    async fn delete_account(&self, id_token: &str) -> Result<(), ProviderError> {
        let body = json!({ "idToken": id_token });
        let _: serde_json::Value = self.post_accounts("delete", &body).await?;
        Ok(())
    }
}

/// Maps the provider's error body (`{"error": {"message": "CODE"}}`) onto
/// the client taxonomy. Unknown codes surface verbatim for diagnosis.
fn map_provider_error(body: &str) -> ProviderError {
    let code = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => return ProviderError::UnexpectedResponse(body.to_string()),
    };

    // Codes may carry a suffix, e.g. "WEAK_PASSWORD : Password should be ...".
    let (prefix, detail) = match code.split_once(':') {
        Some((p, d)) => (p.trim(), d.trim().to_string()),
        None => (code.trim(), String::new()),
    };

    match prefix {
        "EMAIL_EXISTS" => ProviderError::EmailInUse,
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND"
        | "INVALID_EMAIL" => ProviderError::InvalidCredentials,
        "WEAK_PASSWORD" => ProviderError::WeakPassword(detail),
        "USER_DISABLED" => ProviderError::UserDisabled,
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "INVALID_ID_TOKEN" | "USER_NOT_FOUND" => {
            ProviderError::TokenExpired
        }
        "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => ProviderError::RequiresRecentLogin,
        "OPERATION_NOT_ALLOWED" | "CONFIGURATION_NOT_FOUND" | "API_KEY_INVALID" => {
            ProviderError::Misconfigured(code)
        }
        _ => ProviderError::UnexpectedResponse(code),
    }
}
