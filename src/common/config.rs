// Environment-backed configuration

use std::env;
use std::path::PathBuf;

/// Application configuration assembled once at startup.
///
/// Every knob has a default so the client runs against the hosted backend
/// out of the box; tests construct configs directly and point the URLs at
/// loopback stubs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the LoanLink REST API.
    pub api_base_url: String,
    /// Base URL of the identity-toolkit accounts API.
    pub identity_base_url: String,
    /// Base URL of the secure-token exchange API.
    pub token_base_url: String,
    /// API key appended to every identity-provider request.
    pub identity_api_key: String,
    /// Image-host upload endpoint (avatars, loan images).
    pub image_host_url: String,
    /// Image-host API key; uploads are unavailable without it.
    pub image_host_key: Option<String>,
    /// Location of the local preference file (theme).
    pub prefs_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("LOANLINK_API_BASE_URL")
            .unwrap_or_else(|_| "https://micro-loan-server.vercel.app".to_string());
        let identity_base_url = env::var("LOANLINK_IDENTITY_BASE_URL")
            .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com/v1".to_string());
        let token_base_url = env::var("LOANLINK_TOKEN_BASE_URL")
            .unwrap_or_else(|_| "https://securetoken.googleapis.com/v1".to_string());
        let identity_api_key = env::var("LOANLINK_IDENTITY_API_KEY")
            .unwrap_or_else(|_| "replace_with_identity_api_key".to_string());
        let image_host_url = env::var("LOANLINK_IMAGE_HOST_URL")
            .unwrap_or_else(|_| "https://api.imgbb.com/1/upload".to_string());
        let image_host_key = env::var("LOANLINK_IMAGE_HOST_KEY").ok();
        let prefs_path = env::var("LOANLINK_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_prefs_path());

        Self {
            api_base_url,
            identity_base_url,
            token_base_url,
            identity_api_key,
            image_host_url,
            image_host_key,
            prefs_path,
        }
    }

    /// `~/.loanlink/preferences.json`, falling back to the working directory
    /// when no home directory can be determined.
    pub fn default_prefs_path() -> PathBuf {
        home::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".loanlink")
            .join("preferences.json")
    }
}
