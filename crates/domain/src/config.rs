//! Provider configuration structures
//!
//! Loaded by `dialplane-infra::config::loader` from the environment or a
//! TOML/JSON file. Every section has serde defaults so a file only needs the
//! credentials.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DELETE_TIMEOUT_SECS, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_READ_TIMEOUT_SECS, DEFAULT_REGION, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_STATUS_CHANGE_TIMEOUT_SECS, LIST_PAGE_SIZE,
};
use crate::errors::{DialplaneError, Result};

/// Top-level provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl ProviderConfig {
    /// Check required fields and value ranges.
    ///
    /// # Errors
    /// Returns `DialplaneError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.api.client_id.trim().is_empty() {
            return Err(DialplaneError::Config("api.client_id must not be empty".to_string()));
        }
        if self.api.client_secret.trim().is_empty() {
            return Err(DialplaneError::Config(
                "api.client_secret must not be empty".to_string(),
            ));
        }
        if self.api.region.trim().is_empty() && self.api.base_url.is_none() {
            return Err(DialplaneError::Config(
                "either api.region or api.base_url must be set".to_string(),
            ));
        }
        if self.api.max_attempts == 0 {
            return Err(DialplaneError::Config("api.max_attempts must be at least 1".to_string()));
        }
        if self.timeouts.poll_interval_millis == 0 {
            return Err(DialplaneError::Config(
                "timeouts.poll_interval_millis must be greater than 0".to_string(),
            ));
        }
        if self.export.page_size == 0 {
            return Err(DialplaneError::Config("export.page_size must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Platform API connection settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Platform region domain, e.g. `mypurecloud.com` or `mypurecloud.ie`
    #[serde(default = "default_region")]
    pub region: String,
    /// Overrides the API base URL derived from `region`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Overrides the login URL derived from `region`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Attempts per HTTP request for transient failures
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            base_url: None,
            login_url: None,
            client_id: String::new(),
            client_secret: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl ApiConfig {
    pub fn api_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://api.{}", self.region))
            .trim_end_matches('/')
            .to_string()
    }

    pub fn login_base_url(&self) -> String {
        self.login_url
            .clone()
            .unwrap_or_else(|| format!("https://login.{}", self.region))
            .trim_end_matches('/')
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .field("login_url", &self.login_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Budgets for polling server-side state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub read_secs: u64,
    pub delete_secs: u64,
    pub status_change_secs: u64,
    pub poll_interval_millis: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            read_secs: DEFAULT_READ_TIMEOUT_SECS,
            delete_secs: DEFAULT_DELETE_TIMEOUT_SECS,
            status_change_secs: DEFAULT_STATUS_CHANGE_TIMEOUT_SECS,
            poll_interval_millis: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl TimeoutConfig {
    pub fn read(&self) -> Duration {
        Duration::from_secs(self.read_secs)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_secs(self.delete_secs)
    }

    pub fn status_change(&self) -> Duration {
        Duration::from_secs(self.status_change_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }
}

/// Exporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub page_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { page_size: LIST_PAGE_SIZE }
    }
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProviderConfig {
        ProviderConfig {
            api: ApiConfig {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                ..ApiConfig::default()
            },
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn urls_derive_from_region() {
        let mut config = valid();
        config.api.region = "mypurecloud.ie".to_string();
        assert_eq!(config.api.api_base_url(), "https://api.mypurecloud.ie");
        assert_eq!(config.api.login_base_url(), "https://login.mypurecloud.ie");

        config.api.base_url = Some("http://127.0.0.1:8080/".to_string());
        assert_eq!(config.api.api_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn defaults_match_documented_budgets() {
        let timeouts = TimeoutConfig::default();
        assert_eq!(timeouts.read(), Duration::from_secs(300));
        assert_eq!(timeouts.delete(), Duration::from_secs(30));
        assert_eq!(ExportConfig::default().page_size, 100);
    }

    #[test]
    fn validation_rejects_missing_credentials() {
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.api.client_secret = " ".to_string();
        assert!(matches!(config.validate(), Err(DialplaneError::Config(_))));
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", valid().api);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("\"secret\""));
    }

    #[test]
    fn minimal_document_fills_defaults() {
        let config: ProviderConfig =
            serde_json::from_str(r#"{"api":{"client_id":"a","client_secret":"b"}}"#).unwrap();
        assert_eq!(config.api.region, "mypurecloud.com");
        assert_eq!(config.timeouts, TimeoutConfig::default());
        assert_eq!(config.export.page_size, 100);
    }
}
