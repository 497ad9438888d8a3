//! Time-boxed polling on top of [`RetryExecutor`]
//!
//! Both helpers retry at a fixed interval with no attempt cap; the only
//! limit is the wall-clock budget. When the budget runs out the last error is
//! returned inside [`RetryError::TimeoutExceeded`].

use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::retry::policies::PredicateRetry;
use super::retry::{RetryConfig, RetryDecision, RetryError, RetryExecutor, RetryPolicy, RetryResult};

/// Outcome classification returned by a polled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retryable<E> {
    /// The condition has not settled yet; try again after the interval.
    Transient(E),
    /// Give up immediately.
    Fatal(E),
}

impl<E> Retryable<E> {
    /// Unwrap the inner error regardless of classification.
    pub fn into_inner(self) -> E {
        match self {
            Self::Transient(e) | Self::Fatal(e) => e,
        }
    }

    /// Whether the error asks for another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl<E: fmt::Display> fmt::Display for Retryable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient(e) | Self::Fatal(e) => e.fmt(f),
        }
    }
}

struct ClassifiedRetry;

impl<E> RetryPolicy<Retryable<E>> for ClassifiedRetry {
    fn should_retry(&self, error: &Retryable<E>, _attempt: u32) -> RetryDecision {
        if error.is_transient() {
            RetryDecision::Retry
        } else {
            RetryDecision::Stop
        }
    }
}

/// Re-run `operation` every `interval` until it succeeds, returns
/// [`Retryable::Fatal`], or `budget` elapses.
///
/// # Errors
///
/// - [`RetryError::NonRetryable`] with the fatal error
/// - [`RetryError::TimeoutExceeded`] with the last transient error
pub async fn with_retries<F, Fut, T, E>(
    budget: Duration,
    interval: Duration,
    operation: F,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Retryable<E>>>,
    E: fmt::Display,
{
    RetryExecutor::new(RetryConfig::polling(budget, interval), ClassifiedRetry)
        .execute(operation)
        .await
        .map_err(unwrap_classified)
}

/// Re-run `operation` while its error satisfies `when`, until `budget`
/// elapses. Any error failing `when` ends the loop immediately.
///
/// # Errors
///
/// - [`RetryError::NonRetryable`] with the first error rejected by `when`
/// - [`RetryError::TimeoutExceeded`] with the last accepted error
pub async fn retry_when<F, Fut, T, E, W>(
    budget: Duration,
    interval: Duration,
    when: W,
    operation: F,
) -> RetryResult<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    W: Fn(&E) -> bool,
    E: fmt::Display,
{
    RetryExecutor::new(RetryConfig::polling(budget, interval), PredicateRetry::new(when))
        .execute(operation)
        .await
}

fn unwrap_classified<E>(error: RetryError<Retryable<E>>) -> RetryError<E> {
    match error {
        RetryError::AttemptsExhausted { attempts, last } => {
            RetryError::AttemptsExhausted { attempts, last: last.into_inner() }
        }
        RetryError::NonRetryable { error } => RetryError::NonRetryable { error: error.into_inner() },
        RetryError::InvalidConfiguration { message } => RetryError::InvalidConfiguration { message },
        RetryError::TimeoutExceeded { budget, attempts, last } => {
            RetryError::TimeoutExceeded { budget, attempts, last: last.into_inner() }
        }
    }
}
