//! Configuration loading
//!
//! Reads [`dialplane_domain::ProviderConfig`] from environment variables
//! and files.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, parse_config, probe_config_paths};
