//! API authentication with OAuth client credentials
//!
//! Tokens are fetched from `{login}/oauth/token` with HTTP basic auth and
//! cached until shortly before they expire.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dialplane_domain::ApiConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Refresh this long before the server-side expiry.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token, fetching a new one when needed.
    async fn access_token(&self) -> Result<String, ApiError>;

    /// Drop any cached token so the next call fetches a fresh one.
    async fn invalidate(&self) {}
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Client-credentials grant against the platform login service.
pub struct ClientCredentialsTokenProvider {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    cache: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsTokenProvider {
    pub fn new(
        http: HttpClient,
        login_base_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token_url: format!("{}/oauth/token", login_base_url.trim_end_matches('/')),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn from_config(http: HttpClient, config: &ApiConfig) -> Self {
        Self::new(http, &config.login_base_url(), &config.client_id, &config.client_secret)
    }

    async fn fetch_token(&self) -> Result<CachedToken, ApiError> {
        debug!(url = %self.token_url, "requesting access token");

        let request = self
            .http
            .request(Method::POST, &self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials");

        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::Network(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Any rejection of the credentials is an auth failure, whatever the status.
            return Err(match ApiError::from_status(status, &self.token_url, &body) {
                ApiError::BadRequest(message) => ApiError::Auth(message),
                other => other,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("invalid token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(0));
        info!(expires_in_secs = lifetime.as_secs(), "obtained access token");

        Ok(CachedToken {
            value: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let value = fresh.value.clone();
        *cache = Some(fresh);
        Ok(value)
    }

    async fn invalidate(&self) {
        self.cache.lock().await.take();
    }
}
