//! Resilience patterns for transient failures and eventually-consistent APIs
//!
//! - **Retry**: [`RetryExecutor`] drives an async operation under a
//!   [`RetryConfig`] and a [`RetryPolicy`], with fixed or doubling backoff.
//! - **Polling**: [`with_retries`] and [`retry_when`] re-run an operation at a
//!   fixed interval until a wall-clock budget is spent. They are used to wait
//!   for server-side state transitions to settle.
//!
//! Everything here is generic over the error type; classification of which
//! errors are transient belongs to the caller.

pub mod polling;
pub mod retry;

pub use polling::{retry_when, with_retries, Retryable};
pub use retry::{
    policies, Backoff, RetryConfig, RetryDecision, RetryError, RetryExecutor, RetryPolicy,
    RetryResult,
};
