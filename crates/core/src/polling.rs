//! Glue between the generic retry helpers and `DialplaneError`

use std::future::Future;
use std::time::Duration;

use dialplane_common::resilience::{self, RetryError, Retryable};
use dialplane_domain::{DialplaneError, Result};

/// Transient when the error class is worth another attempt.
pub fn classify(error: DialplaneError) -> Retryable<DialplaneError> {
    if error.is_retryable() {
        Retryable::Transient(error)
    } else {
        Retryable::Fatal(error)
    }
}

/// Collapse a retry failure into the domain error, keeping the last cause.
pub fn flatten(error: RetryError<DialplaneError>) -> DialplaneError {
    match error {
        RetryError::NonRetryable { error } => error,
        RetryError::AttemptsExhausted { last, .. } | RetryError::TimeoutExceeded { last, .. } => {
            DialplaneError::Timeout(last.to_string())
        }
        RetryError::InvalidConfiguration { message } => DialplaneError::Internal(message),
    }
}

/// Poll `operation` every `interval` until it settles or `budget` elapses.
pub async fn poll<F, Fut, T>(budget: Duration, interval: Duration, operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, Retryable<DialplaneError>>>,
{
    resilience::with_retries(budget, interval, operation).await.map_err(flatten)
}

/// Re-run `operation` while its error satisfies `when`.
pub async fn retry_while<F, Fut, T, W>(
    budget: Duration,
    interval: Duration,
    when: W,
    operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    W: Fn(&DialplaneError) -> bool,
{
    resilience::retry_when(budget, interval, when, operation).await.map_err(flatten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustion_keeps_last_cause_in_message() {
        let err = flatten(RetryError::TimeoutExceeded {
            budget: Duration::from_secs(30),
            attempts: 15,
            last: DialplaneError::Pending("Outbound Campaign abc still exists".into()),
        });
        assert_eq!(
            err,
            DialplaneError::Timeout("Outbound Campaign abc still exists".into())
        );
    }

    #[test]
    fn terminal_errors_pass_through() {
        let err = flatten(RetryError::NonRetryable { error: DialplaneError::Auth("401".into()) });
        assert_eq!(err, DialplaneError::Auth("401".into()));
    }

    #[test]
    fn classification_follows_error_kind() {
        assert!(classify(DialplaneError::RateLimited("429".into())).is_transient());
        assert!(!classify(DialplaneError::BadRequest("400".into())).is_transient());
    }
}
