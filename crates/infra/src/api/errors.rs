//! Errors raised by the platform API client
//!
//! Non-success responses are classified by status so the conversion into
//! `DialplaneError` can keep not-found and bad-request distinguishable.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401/403, or a rejected token request
    #[error("unauthorized: {0}")]
    Auth(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("rate limited: {0}")]
    RateLimit(String),

    #[error("platform error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other 4xx
    #[error("request rejected ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("transport failure: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("client misconfigured: {0}")]
    Config(String),
}

impl ApiError {
    /// Classify a non-success response. The body, when present, is kept in
    /// the message since the platform explains rejections there.
    pub fn from_status(status: StatusCode, url: &str, body: &str) -> Self {
        let message = match body.trim() {
            "" => format!("{url} returned {status}"),
            body => format!("{url} returned {status}: {body}"),
        };

        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::CONFLICT => Self::Conflict(message),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimit(message),
            s if s.is_server_error() => Self::Server { status: s.as_u16(), message },
            s if s.is_client_error() => Self::Client { status: s.as_u16(), message },
            _ => Self::Network(message),
        }
    }

    /// Auth failures are retried once, after a token refresh.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}
