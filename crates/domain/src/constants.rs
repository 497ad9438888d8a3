//! Domain constants
//!
//! Resource type names and field identifiers shared by adapters, exporters
//! and the configuration layer.

// Resource type names
pub const CAMPAIGN_RESOURCE: &str = "outbound_campaign";
pub const CONTACT_LIST_RESOURCE: &str = "outbound_contact_list";
pub const SITE_RESOURCE: &str = "telephony_providers_edges_site";

// Human-readable entity labels used in messages
pub const CAMPAIGN_LABEL: &str = "Outbound Campaign";
pub const CONTACT_LIST_LABEL: &str = "Outbound Contact List";
pub const SITE_LABEL: &str = "Site";

// Paging
pub const LIST_PAGE_SIZE: u32 = 100;
pub const NAME_LOOKUP_PAGE_SIZE: u32 = 50;

// Defaults
pub const DEFAULT_REGION: &str = "mypurecloud.com";
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_DELETE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_STATUS_CHANGE_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

// Outbound route distribution values
pub const ROUTE_DISTRIBUTIONS: [&str; 2] = ["SEQUENTIAL", "RANDOM"];
