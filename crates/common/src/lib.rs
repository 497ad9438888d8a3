//! Generic utilities shared across dialplane crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: error types only
//! - `runtime`: async infrastructure (retry executor, time-boxed polling)
//! - `observability`: tracing instrumentation (implied by `runtime`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod resilience;

#[cfg(feature = "runtime")]
pub use resilience::{
    retry_when, with_retries, Backoff, RetryConfig, RetryDecision, RetryError, RetryExecutor,
    RetryPolicy, RetryResult,
};
