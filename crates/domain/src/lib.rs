//! # Dialplane Domain
//!
//! Entity types and models for the dialplane resource adapters.
//!
//! This crate contains:
//! - Platform entity types (Campaign, ContactList, Site, OutboundRoute, etc.)
//! - Domain error types and Result definitions
//! - Provider configuration structures
//! - The resource boundary types exchanged with the declarative engine
//!   (`ResourceData`, `Diagnostics`, export metadata)
//!
//! ## Architecture
//! - No dependencies on other dialplane crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod errors;
pub mod export;
pub mod macros;
pub mod resource;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use errors::*;
pub use export::{ResourceIdMetaMap, ResourceMeta};
pub use resource::{Block, ResourceData};
pub use types::*;
