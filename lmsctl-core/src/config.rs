//! Configuration management
//!
//! Settings live in `settings.json` inside the lmsctl directory:
//! ```json
//! {
//!   "api": {
//!     "baseUrl": "https://lms.example.com/api",
//!     "updateUserPath": "/user/update",
//!     "deleteAccountPath": "/user/delete",
//!     "requestTimeoutSecs": 30
//!   }
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "LMSCTL_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";
const DEFAULT_UPDATE_USER_PATH: &str = "/user/update";
const DEFAULT_DELETE_ACCOUNT_PATH: &str = "/user/delete";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    update_user_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delete_account_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
}

/// Resolved lmsctl configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub update_user_path: String,
    pub delete_account_path: String,
    pub request_timeout: Duration,
    /// Stored base URL that failed validation and was replaced by the default
    pub rejected_base_url: Option<String>,
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            update_user_path: DEFAULT_UPDATE_USER_PATH.to_string(),
            delete_account_path: DEFAULT_DELETE_ACCOUNT_PATH.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rejected_base_url: None,
            _raw_settings: SettingsFile::default(),
        }
    }
}

impl Config {
    /// Load config from the lmsctl directory.
    ///
    /// The base URL comes from `LMSCTL_API_URL` if set, then the settings
    /// file, then the default. A malformed settings file is treated as empty
    /// and an invalid stored URL falls back to the default; an invalid
    /// `LMSCTL_API_URL` is an error.
    pub fn load(lmsctl_dir: &Path) -> Result<Self> {
        let settings_path = lmsctl_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let mut rejected_base_url = None;
        let api_base_url = match std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            Some(url) => validate_base_url(&url)?,
            None => match raw.api.base_url.as_deref().map(validate_base_url) {
                Some(Ok(url)) => url,
                Some(Err(_)) => {
                    rejected_base_url = raw.api.base_url.clone();
                    DEFAULT_BASE_URL.to_string()
                }
                None => DEFAULT_BASE_URL.to_string(),
            },
        };

        let config = Self {
            api_base_url,
            update_user_path: raw
                .api
                .update_user_path
                .clone()
                .unwrap_or_else(|| DEFAULT_UPDATE_USER_PATH.to_string()),
            delete_account_path: raw
                .api
                .delete_account_path
                .clone()
                .unwrap_or_else(|| DEFAULT_DELETE_ACCOUNT_PATH.to_string()),
            request_timeout: Duration::from_secs(
                raw.api.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            rejected_base_url,
            _raw_settings: raw,
        };

        Ok(config)
    }

    /// Save config, preserving settings this crate doesn't manage
    pub fn save(&self, lmsctl_dir: &Path) -> Result<()> {
        let settings_path = lmsctl_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        settings.api.base_url = Some(self.api_base_url.clone());
        settings.api.update_user_path = Some(self.update_user_path.clone());
        settings.api.delete_account_path = Some(self.delete_account_path.clone());
        settings.api.request_timeout_secs = Some(self.request_timeout.as_secs());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Point the client at a different backend
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        self.api_base_url = validate_base_url(url.trim())?;
        self.rejected_base_url = None;
        Ok(())
    }

    pub fn update_user_url(&self) -> String {
        join_url(&self.api_base_url, &self.update_user_path)
    }

    pub fn delete_account_url(&self) -> String {
        join_url(&self.api_base_url, &self.delete_account_path)
    }
}

/// Accept only http(s) URLs; strips a trailing slash
fn validate_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("Invalid API base URL: {}", raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("API base URL must use http or https: {}", raw);
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
