//! Outbound contact list adapter and name lookup

pub mod data_source;
pub mod ports;
pub mod resource;

pub use data_source::ContactListDataSource;
pub use ports::ContactListApi;
pub use resource::ContactListResource;
