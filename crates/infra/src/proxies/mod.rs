//! REST implementations of the core ports
//!
//! One proxy per entity API, all sharing a single [`PlatformClient`].

mod campaign;
mod contact_list;
mod site;

use std::sync::Arc;

use dialplane_core::Proxies;

pub use campaign::RestCampaignApi;
pub use contact_list::RestContactListApi;
pub use site::RestSiteApi;

use crate::api::PlatformClient;

/// Wire every port to the REST API behind `client`.
pub fn build_proxies(client: Arc<PlatformClient>) -> Proxies {
    Proxies {
        campaigns: Arc::new(RestCampaignApi::new(Arc::clone(&client))),
        contact_lists: Arc::new(RestContactListApi::new(Arc::clone(&client))),
        sites: Arc::new(RestSiteApi::new(client)),
    }
}

fn paging(page_size: u32, page_number: u32) -> Vec<(&'static str, String)> {
    vec![("pageSize", page_size.to_string()), ("pageNumber", page_number.to_string())]
}
