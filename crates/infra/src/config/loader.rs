//! Configuration loader
//!
//! Loads provider configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the credentials are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `DIALPLANE_CLIENT_ID`: OAuth client id (required)
//! - `DIALPLANE_CLIENT_SECRET`: OAuth client secret (required)
//! - `DIALPLANE_REGION`: Platform region domain, e.g. `mypurecloud.ie`
//! - `DIALPLANE_BASE_URL`: API base URL override
//! - `DIALPLANE_LOGIN_URL`: Login service URL override
//! - `DIALPLANE_REQUEST_TIMEOUT_SECS`: Per-request timeout
//! - `DIALPLANE_MAX_ATTEMPTS`: Attempts per request on transient failures
//! - `DIALPLANE_READ_TIMEOUT_SECS`: Read polling budget
//! - `DIALPLANE_DELETE_TIMEOUT_SECS`: Delete confirmation budget
//! - `DIALPLANE_STATUS_CHANGE_TIMEOUT_SECS`: Campaign status change budget
//! - `DIALPLANE_POLL_INTERVAL_MS`: Delay between polls
//! - `DIALPLANE_EXPORT_PAGE_SIZE`: Page size used by exports
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./dialplane.toml` or `./dialplane.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use dialplane_domain::{ApiConfig, DialplaneError, ProviderConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["dialplane.toml", "dialplane.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the credentials
/// are not set there, falls back to loading from a config file. The result
/// is validated either way.
///
/// # Errors
/// Returns `DialplaneError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or out of range
pub fn load() -> Result<ProviderConfig> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only the client credentials are required; everything else falls back to
/// the documented defaults.
///
/// # Errors
/// Returns `DialplaneError::Config` if the credentials are missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<ProviderConfig> {
    let mut config = ProviderConfig {
        api: ApiConfig {
            client_id: env_var("DIALPLANE_CLIENT_ID")?,
            client_secret: env_var("DIALPLANE_CLIENT_SECRET")?,
            ..ApiConfig::default()
        },
        ..ProviderConfig::default()
    };

    if let Some(region) = env_opt("DIALPLANE_REGION") {
        config.api.region = region;
    }
    config.api.base_url = env_opt("DIALPLANE_BASE_URL");
    config.api.login_url = env_opt("DIALPLANE_LOGIN_URL");

    if let Some(secs) = env_parse("DIALPLANE_REQUEST_TIMEOUT_SECS")? {
        config.api.request_timeout_secs = secs;
    }
    if let Some(attempts) = env_parse("DIALPLANE_MAX_ATTEMPTS")? {
        config.api.max_attempts = attempts;
    }
    if let Some(secs) = env_parse("DIALPLANE_READ_TIMEOUT_SECS")? {
        config.timeouts.read_secs = secs;
    }
    if let Some(secs) = env_parse("DIALPLANE_DELETE_TIMEOUT_SECS")? {
        config.timeouts.delete_secs = secs;
    }
    if let Some(secs) = env_parse("DIALPLANE_STATUS_CHANGE_TIMEOUT_SECS")? {
        config.timeouts.status_change_secs = secs;
    }
    if let Some(millis) = env_parse("DIALPLANE_POLL_INTERVAL_MS")? {
        config.timeouts.poll_interval_millis = millis;
    }
    if let Some(size) = env_parse("DIALPLANE_EXPORT_PAGE_SIZE")? {
        config.export.page_size = size;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `DialplaneError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ProviderConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DialplaneError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DialplaneError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DialplaneError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension.
///
/// # Errors
/// Returns `DialplaneError::Config` if format is invalid or parsing fails.
pub fn parse_config(contents: &str, path: &Path) -> Result<ProviderConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DialplaneError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DialplaneError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(DialplaneError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its two parents, then the same three
/// levels relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `DialplaneError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        DialplaneError::Config(format!("Missing required environment variable: {}", key))
    })
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| DialplaneError::Config(format!("Invalid value for {}: {}", key, e)))
        })
        .transpose()
}
