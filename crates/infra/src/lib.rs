//! # Dialplane Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with retry on transient failures
//! - OAuth client-credentials token provider
//! - Platform API client and REST proxies for every core port
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `dialplane-core`
//! - Contains all "impure" code (network I/O, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod proxies;

pub use api::{ApiError, ClientCredentialsTokenProvider, PlatformClient};
pub use http::HttpClient;
pub use proxies::build_proxies;
