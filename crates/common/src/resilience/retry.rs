//! Retry executor with pluggable policies and bounded budgets
//!
//! An operation is re-run until it succeeds, the policy refuses another try,
//! the attempt cap is hit or the wall-clock budget is spent. Exhaustion
//! errors carry the last failure so callers can report why an operation
//! never converged (e.g. "entity still exists").

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a retried operation finally failed
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The attempt cap was reached
    #[error("all retry attempts exhausted after {attempts} tries: {last}")]
    AttemptsExhausted { attempts: u32, last: E },

    /// The policy refused to retry this error
    #[error("{error}")]
    NonRetryable { error: E },

    /// The configuration can never run an attempt
    #[error("invalid retry configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The wall-clock budget ran out while the operation was still failing
    #[error("retry budget of {budget:?} exceeded after {attempts} tries: {last}")]
    TimeoutExceeded { budget: Duration, attempts: u32, last: E },
}

pub type RetryResult<T, E> = Result<T, RetryError<E>>;

/// Decides, per failure, whether another attempt is worth it.
pub trait RetryPolicy<E> {
    /// `attempt` is 0-based.
    fn should_retry(&self, error: &E, attempt: u32) -> RetryDecision;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the configured backoff
    Retry,
    /// Retry after exactly this delay
    RetryAfter(Duration),
    Stop,
}

/// Delay between attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay every time; used for polling
    Fixed(Duration),
    /// Doubles from `initial` after each failure, never above `max`; used
    /// for request retries
    Doubling { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay after the given 0-based attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::Doubling { initial, max } => {
                let factor = 1u32.checked_shl(attempt.min(31)).unwrap_or(u32::MAX);
                initial.saturating_mul(factor).min(*max)
            }
        }
    }
}

/// Limits and pacing for a [`RetryExecutor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Wall-clock limit across all attempts and sleeps
    pub budget: Option<Duration>,
}

impl RetryConfig {
    /// A fixed number of attempts with no time limit.
    pub fn attempts(max_attempts: u32, backoff: Backoff) -> Self {
        Self { max_attempts, backoff, budget: None }
    }

    /// Time-boxed polling: unlimited attempts every `interval` until
    /// `budget` has elapsed.
    pub fn polling(budget: Duration, interval: Duration) -> Self {
        Self { max_attempts: u32::MAX, backoff: Backoff::Fixed(interval), budget: Some(budget) }
    }

    /// # Errors
    /// [`RetryError::InvalidConfiguration`] when no attempt would ever run.
    pub fn validate<E>(&self) -> RetryResult<(), E> {
        if self.max_attempts == 0 {
            return Err(RetryError::InvalidConfiguration {
                message: "max_attempts must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Runs an operation under a [`RetryConfig`] and a [`RetryPolicy`].
pub struct RetryExecutor<P> {
    config: RetryConfig,
    policy: P,
}

impl<P> RetryExecutor<P> {
    pub fn new(config: RetryConfig, policy: P) -> Self {
        Self { config, policy }
    }

    /// Run `operation` until it succeeds or a limit or the policy stops it.
    ///
    /// Sleeps are clipped to the remaining budget, so the loop never
    /// overshoots it by more than one attempt.
    #[instrument(skip(self, operation), fields(max_attempts = self.config.max_attempts))]
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> RetryResult<T, E>
    where
        P: RetryPolicy<E>,
        E: fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.config.validate::<E>()?;
        let started = Instant::now();

        for attempt in 0..self.config.max_attempts {
            let error = match operation().await {
                Ok(value) => {
                    debug!(attempts = attempt + 1, "operation succeeded");
                    return Ok(value);
                }
                Err(error) => error,
            };
            let tried = attempt + 1;

            let delay = match self.policy.should_retry(&error, attempt) {
                RetryDecision::Stop => return Err(RetryError::NonRetryable { error }),
                RetryDecision::Retry => self.config.backoff.delay_after(attempt),
                RetryDecision::RetryAfter(delay) => delay,
            };

            if tried == self.config.max_attempts {
                warn!(attempts = tried, error = %error, "retry attempts exhausted");
                return Err(RetryError::AttemptsExhausted { attempts: tried, last: error });
            }

            let delay = match self.config.budget {
                Some(budget) => match budget.checked_sub(started.elapsed()) {
                    Some(left) if !left.is_zero() => delay.min(left),
                    _ => {
                        warn!(?budget, attempts = tried, error = %error, "retry budget exceeded");
                        return Err(RetryError::TimeoutExceeded { budget, attempts: tried, last: error });
                    }
                },
                None => delay,
            };

            debug!(attempt = tried, ?delay, error = %error, "retrying");
            tokio::time::sleep(delay).await;
        }

        Err(RetryError::InvalidConfiguration { message: "retry loop ran no attempts".to_string() })
    }
}

/// Stock policies
pub mod policies {
    use super::{RetryDecision, RetryPolicy};

    /// Retries the errors a predicate accepts.
    #[derive(Debug)]
    pub struct PredicateRetry<F> {
        predicate: F,
    }

    impl<F> PredicateRetry<F> {
        pub fn new(predicate: F) -> Self {
            Self { predicate }
        }
    }

    impl<F, E> RetryPolicy<E> for PredicateRetry<F>
    where
        F: Fn(&E) -> bool,
    {
        fn should_retry(&self, error: &E, _attempt: u32) -> RetryDecision {
            if (self.predicate)(error) {
                RetryDecision::Retry
            } else {
                RetryDecision::Stop
            }
        }
    }
}
