//! Platform REST API client
//!
//! - Client-credentials OAuth with a cached bearer token
//! - Status-code classification into [`ApiError`]
//! - Transport retries delegated to [`crate::http::HttpClient`]

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, ClientCredentialsTokenProvider};
pub use client::PlatformClient;
pub use errors::ApiError;
