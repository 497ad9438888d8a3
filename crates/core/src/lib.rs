//! # Dialplane Core
//!
//! Resource adapter logic - no HTTP or platform SDK code.
//!
//! This crate contains:
//! - Port interfaces (one async trait per platform API)
//! - Resource adapters and data sources for campaigns, contact lists and
//!   sites
//! - Pagination, name lookup and status-transition protocols
//!
//! ## Architecture Principles
//! - Only depends on `dialplane-common` and `dialplane-domain`
//! - All external calls go through the port traits
//! - Every operation runs under an [`OperationContext`]

pub mod adapter;
pub mod campaign;
pub mod contact_list;
pub mod context;
pub mod fields;
pub mod paging;
pub mod polling;
pub mod registry;
pub mod site;

pub use adapter::{DataSource, ResourceAdapter};
pub use campaign::{CampaignApi, CampaignResource};
pub use contact_list::{ContactListApi, ContactListDataSource, ContactListResource};
pub use context::OperationContext;
pub use registry::{Proxies, ResourceRegistry};
pub use site::{SiteApi, SiteDataSource, SiteResource};
