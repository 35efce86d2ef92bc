// Local preference persistence (theme)

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use super::error::ClientError;

/// Theme mode: light or dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Light
    }
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Preferences persisted between runs. Single small JSON file; the browser
/// build keeps the same key in local storage. Not security relevant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeMode,
}

impl Preferences {
    /// Loads preferences, falling back to defaults when the file is missing
    /// or unreadable. A corrupt file is logged and treated as absent.
    pub async fn load(path: &Path) -> Self {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Ignoring corrupt preference file");
                    Preferences::default()
                }
            },
            Err(_) => Preferences::default(),
        }
    }

    pub async fn save(&self, path: &Path) -> Result<(), ClientError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::Prefs(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(self).map_err(|e| ClientError::Prefs(e.to_string()))?;
        tokio::fs::write(path, raw)
            .await
            .map_err(|e| ClientError::Prefs(e.to_string()))
    }
}
