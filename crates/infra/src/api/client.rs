//! Authenticated platform API client
//!
//! Wraps [`HttpClient`] with bearer authentication, URL building and status
//! classification. A 401/403 triggers one token refresh before giving up.
//! Each attempt is bounded by the HTTP client's own timeout; throttled and
//! failing attempts are retried underneath without an overall cap here.

use std::sync::Arc;

use dialplane_domain::{ApiConfig, DialplaneError};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::auth::{AccessTokenProvider, ClientCredentialsTokenProvider};
use super::errors::ApiError;
use crate::http::HttpClient;

/// Query parameters as name/value pairs.
pub type Query<'a> = [(&'a str, String)];

/// REST client for `https://api.<region>/api/v2/...`.
pub struct PlatformClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: String,
}

impl PlatformClient {
    pub fn new(
        http: HttpClient,
        auth: Arc<dyn AccessTokenProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, auth, base_url }
    }

    /// Client plus client-credentials token provider built from config.
    ///
    /// # Errors
    /// `ApiError::Config` when the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .max_attempts(config.max_attempts)
            .user_agent(concat!("dialplane/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;
        let auth = Arc::new(ClientCredentialsTokenProvider::from_config(http.clone(), config));

        Ok(Self::new(http, auth, config.api_base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, query))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        decode(response).await
    }

    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let response = self.execute(Method::POST, path, &[], Some(body)).await?;
        decode(response).await
    }

    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let response = self.execute(Method::PUT, path, &[], Some(body)).await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    fn url(&self, path: &str, query: &Query<'_>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::Config(format!("invalid request url for {path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &Query<'_>,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path, query)?;

        match self.send_once(method.clone(), &url, body.as_ref()).await {
            Err(err) if err.is_auth() => {
                warn!(%url, "request rejected, refreshing access token");
                self.auth.invalidate().await;
                self.send_once(method, &url, body.as_ref()).await
            }
            other => other,
        }
    }

    async fn send_once(&self, method: Method, url: &Url, body: Option<&Value>) -> Result<Response, ApiError> {
        let token = self.auth.access_token().await?;
        debug!(%method, %url, "platform request");

        let mut request = self
            .http
            .request(method, url.clone())
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = self.http.send(request).await.map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, url.as_str(), &text))
    }
}

fn map_transport_error(err: DialplaneError) -> ApiError {
    match err {
        DialplaneError::Network(message) => ApiError::Network(message),
        DialplaneError::Config(message) => ApiError::Config(message),
        DialplaneError::Upstream { status, message } => ApiError::Server { status, message },
        other => ApiError::Network(other.to_string()),
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("Failed to serialize body: {e}")))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    // 204/205 carry no body by RFC; only `()`-like targets accept that.
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(Value::Null).map_err(|_| {
            ApiError::Decode(format!("No content response ({}) for a typed request", status.as_u16()))
        });
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}
