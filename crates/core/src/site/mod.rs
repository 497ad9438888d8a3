//! Telephony site adapter
//!
//! A site owns its outbound routes and number plans. Routes are reconciled
//! one by one; number plans can only be replaced as a whole list.

pub mod data_source;
pub mod ports;
pub mod resource;
pub mod routes;
mod schema;

pub use data_source::SiteDataSource;
pub use ports::SiteApi;
pub use resource::SiteResource;
