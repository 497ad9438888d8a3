//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for dialplane operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DialplaneError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// A remote state transition has not settled yet.
    #[error("{0}")]
    Pending(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DialplaneError {
    /// The entity does not exist (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The request was rejected as malformed (HTTP 400).
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest(_))
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited(_) | Self::Network(_) | Self::Pending(_) => true,
            Self::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for dialplane operations
pub type Result<T> = std::result::Result<T, DialplaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_helpers() {
        assert!(DialplaneError::NotFound("x".into()).is_not_found());
        assert!(DialplaneError::BadRequest("x".into()).is_bad_request());
        assert!(!DialplaneError::BadRequest("x".into()).is_retryable());
        assert!(DialplaneError::RateLimited("x".into()).is_retryable());
        assert!(DialplaneError::Pending("stopping".into()).is_retryable());
        assert!(DialplaneError::Upstream { status: 503, message: "x".into() }.is_retryable());
        assert!(!DialplaneError::Upstream { status: 409, message: "x".into() }.is_retryable());
        assert!(!DialplaneError::NotFound("x".into()).is_retryable());
    }

    #[test]
    fn pending_message_is_unprefixed() {
        let err = DialplaneError::Pending("Outbound Campaign abc still exists".into());
        assert_eq!(err.to_string(), "Outbound Campaign abc still exists");
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(DialplaneError::Auth("expired".into())).unwrap();
        assert_eq!(json["type"], "Auth");
        assert_eq!(json["message"], "expired");
    }
}
