//! Conversions from external infrastructure errors into domain errors.

use dialplane_domain::DialplaneError;
use reqwest::Error as HttpError;

use crate::api::ApiError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DialplaneError);

impl From<InfraError> for DialplaneError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DialplaneError> for InfraError {
    fn from(value: DialplaneError) -> Self {
        InfraError(value)
    }
}

trait IntoDialplaneError {
    fn into_dialplane(self) -> DialplaneError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DialplaneError */
/* -------------------------------------------------------------------------- */

impl IntoDialplaneError for HttpError {
    fn into_dialplane(self) -> DialplaneError {
        if self.is_timeout() {
            return DialplaneError::Network(format!("http request timed out: {self}"));
        }

        if self.is_connect() {
            return DialplaneError::Network(format!("http connection failed: {self}"));
        }

        if let Some(status) = self.status() {
            return DialplaneError::Upstream {
                status: status.as_u16(),
                message: format!("http status {status}: {self}"),
            };
        }

        if self.is_decode() {
            return DialplaneError::Internal(format!("failed to decode http response: {self}"));
        }

        if self.is_builder() {
            return DialplaneError::Config(format!("invalid http request: {self}"));
        }

        DialplaneError::Network(format!("http error: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_dialplane())
    }
}

/* -------------------------------------------------------------------------- */
/* ApiError → DialplaneError */
/* -------------------------------------------------------------------------- */

impl From<ApiError> for DialplaneError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => DialplaneError::Auth(message),
            ApiError::BadRequest(message) => DialplaneError::BadRequest(message),
            ApiError::NotFound(message) => DialplaneError::NotFound(message),
            ApiError::RateLimit(message) => DialplaneError::RateLimited(message),
            ApiError::Conflict(message) => DialplaneError::Upstream { status: 409, message },
            ApiError::Server { status, message } | ApiError::Client { status, message } => {
                DialplaneError::Upstream { status, message }
            }
            ApiError::Network(message) => DialplaneError::Network(message),
            ApiError::Decode(message) => DialplaneError::Internal(message),
            ApiError::Config(message) => DialplaneError::Config(message),
        }
    }
}
