//! Port interface for telephony sites and their sub-resources

use async_trait::async_trait;
use dialplane_domain::{EntityListing, Location, MediaRegions, NumberPlan, OutboundRoute, Result, Site};

/// Site, outbound route, number plan and reference-data endpoints.
#[async_trait]
pub trait SiteApi: Send + Sync {
    /// One page of sites from the managed or unmanaged partition,
    /// optionally filtered server-side by name.
    async fn list_page(
        &self,
        page_size: u32,
        page_number: u32,
        managed: bool,
        name: Option<&str>,
    ) -> Result<EntityListing<Site>>;

    async fn get(&self, id: &str) -> Result<Site>;

    async fn create(&self, site: &Site) -> Result<Site>;

    async fn update(&self, id: &str, site: &Site) -> Result<Site>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn list_outbound_routes_page(
        &self,
        site_id: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<EntityListing<OutboundRoute>>;

    async fn create_outbound_route(&self, site_id: &str, route: &OutboundRoute) -> Result<OutboundRoute>;

    async fn update_outbound_route(
        &self,
        site_id: &str,
        route_id: &str,
        route: &OutboundRoute,
    ) -> Result<OutboundRoute>;

    async fn delete_outbound_route(&self, site_id: &str, route_id: &str) -> Result<()>;

    async fn get_number_plans(&self, site_id: &str) -> Result<Vec<NumberPlan>>;

    /// Replace every number plan of the site.
    async fn put_number_plans(&self, site_id: &str, plans: &[NumberPlan]) -> Result<Vec<NumberPlan>>;

    async fn get_location(&self, location_id: &str) -> Result<Location>;

    async fn get_media_regions(&self) -> Result<MediaRegions>;
}
