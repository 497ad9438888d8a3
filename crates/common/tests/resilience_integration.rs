//! Integration tests for the resilience module
//!
//! Exercises retry and polling helpers through the public API with an error
//! type that classifies itself.

#![cfg(feature = "runtime")]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dialplane_common::resilience::{
    policies, retry_when, with_retries, Backoff, RetryConfig, RetryError, RetryExecutor, Retryable,
};

#[derive(Debug, Clone, PartialEq)]
struct TestError {
    message: String,
    retryable: bool,
}

impl TestError {
    fn transient(message: &str) -> Self {
        Self { message: message.to_string(), retryable: true }
    }

    fn fatal(message: &str) -> Self {
        Self { message: message.to_string(), retryable: false }
    }
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TestError {}

/// Doubling backoff recovers from a short outage within its attempt cap.
///
/// # Test Steps
/// 1. Fail the first three attempts
/// 2. Succeed on the fourth
/// 3. Verify exactly four attempts were made
#[tokio::test(flavor = "multi_thread")]
async fn test_retry_doubling_backoff_success() {
    let attempt_count = Arc::new(AtomicU32::new(0));

    let config = RetryConfig::attempts(
        5,
        Backoff::Doubling { initial: Duration::from_millis(2), max: Duration::from_millis(20) },
    );
    let policy = policies::PredicateRetry::new(|e: &TestError| e.retryable);

    let result = RetryExecutor::new(config, policy)
        .execute(|| {
            let count = Arc::clone(&attempt_count);
            async move {
                if count.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(TestError::transient("connection reset"))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

    assert_eq!(result.expect("retry should succeed"), "done");
    assert_eq!(attempt_count.load(Ordering::SeqCst), 4);
}

/// A predicate policy stops on the first error it rejects.
#[tokio::test]
async fn test_predicate_policy_stops_on_fatal_error() {
    let config = RetryConfig::attempts(10, Backoff::Fixed(Duration::from_millis(1)));

    let attempt_count = Arc::new(AtomicU32::new(0));
    let policy = policies::PredicateRetry::new(|e: &TestError| e.retryable);

    let result: Result<(), _> = RetryExecutor::new(config, policy)
        .execute(|| {
            let count = Arc::clone(&attempt_count);
            async move {
                if count.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(TestError::transient("busy"))
                } else {
                    Err(TestError::fatal("forbidden"))
                }
            }
        })
        .await;

    match result {
        Err(RetryError::NonRetryable { error }) => assert_eq!(error.message, "forbidden"),
        other => panic!("expected NonRetryable, got {other:?}"),
    }
    assert_eq!(attempt_count.load(Ordering::SeqCst), 2);
}

/// Polling waits for an asynchronous transition and returns its result.
#[tokio::test]
async fn test_polling_waits_for_state_transition() {
    let polls = Arc::new(AtomicU32::new(0));

    let state = with_retries(Duration::from_secs(5), Duration::from_millis(1), || {
        let polls = Arc::clone(&polls);
        async move {
            match polls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err(Retryable::Transient(TestError::transient("stopping"))),
                _ => Ok("off"),
            }
        }
    })
    .await
    .expect("polling should settle");

    assert_eq!(state, "off");
    assert_eq!(polls.load(Ordering::SeqCst), 3);
}

/// The budget bounds polling and the last cause is preserved.
#[tokio::test]
async fn test_polling_budget_preserves_last_cause() {
    let result: Result<(), _> =
        with_retries(Duration::from_millis(25), Duration::from_millis(5), || async {
            Err(Retryable::Transient(TestError::transient("Outbound Campaign 42 still exists")))
        })
        .await;

    let err = result.expect_err("budget must run out");
    assert!(err.to_string().contains("still exists"));
    match err {
        RetryError::TimeoutExceeded { last, .. } => {
            assert_eq!(last.message, "Outbound Campaign 42 still exists");
        }
        other => panic!("expected TimeoutExceeded, got {other:?}"),
    }
}

/// `retry_when` repeats a whole unit of work while the predicate holds.
#[tokio::test]
async fn test_retry_when_repeats_unit_until_success() {
    let units = Arc::new(AtomicU32::new(0));

    let result = retry_when(
        Duration::from_secs(5),
        Duration::from_millis(1),
        |e: &TestError| e.retryable,
        || {
            let units = Arc::clone(&units);
            async move {
                if units.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(TestError::transient("version conflict"))
                } else {
                    Ok(())
                }
            }
        },
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(units.load(Ordering::SeqCst), 3);
}
