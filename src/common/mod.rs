// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod helpers;
pub mod nav;
pub mod notify;
pub mod prefs;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::ClientError;
pub use helpers::{safe_email_log, safe_token_log};
pub use nav::Navigator;
pub use notify::{Notification, Notifier, NotifyLevel};
pub use prefs::{Preferences, ThemeMode};
pub use state::{AppContext, AppStreams};
pub use validation::{ValidationError, ValidationResult, Validator};
