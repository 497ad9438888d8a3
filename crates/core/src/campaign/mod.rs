//! Outbound campaign adapter
//!
//! Campaign CRUD is a field mapping plus a status protocol: campaigns are
//! always created `off`, enabled in a second step, and must be turned off
//! and drained out of `stopping` before they can be deleted.

pub mod ports;
pub mod resource;
mod schema;
pub mod status;

pub use ports::CampaignApi;
pub use resource::CampaignResource;
