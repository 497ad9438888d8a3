//! Shared test helpers for `dialplane-core` integration tests.
//!
//! In-memory fakes for every port, with call counters so tests can assert
//! on the exact sequence of API traffic an adapter produces.

#![allow(dead_code)]

pub mod campaigns;
pub mod contact_lists;
pub mod sites;

use dialplane_domain::TimeoutConfig;

/// Budgets small enough for tests: one second of polling every 5ms.
pub fn fast_timeouts() -> TimeoutConfig {
    TimeoutConfig { read_secs: 1, delete_secs: 1, status_change_secs: 1, poll_interval_millis: 5 }
}

/// A name no other test uses.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
