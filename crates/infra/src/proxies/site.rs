use std::sync::Arc;

use async_trait::async_trait;
use dialplane_core::SiteApi;
use dialplane_domain::{EntityListing, Location, MediaRegions, NumberPlan, OutboundRoute, Result, Site};
use urlencoding::encode;

use super::paging;
use crate::api::PlatformClient;

const SITES: &str = "/api/v2/telephony/providers/edges/sites";
const LOCATIONS: &str = "/api/v2/locations";
const MEDIA_REGIONS: &str = "/api/v2/telephony/mediaregions";

pub struct RestSiteApi {
    client: Arc<PlatformClient>,
}

impl RestSiteApi {
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

fn site_path(id: &str) -> String {
    format!("{SITES}/{}", encode(id))
}

#[async_trait]
impl SiteApi for RestSiteApi {
    async fn list_page(
        &self,
        page_size: u32,
        page_number: u32,
        managed: bool,
        name: Option<&str>,
    ) -> Result<EntityListing<Site>> {
        let mut query = paging(page_size, page_number);
        query.push(("managed", managed.to_string()));
        if let Some(name) = name {
            query.push(("name", name.to_string()));
        }
        Ok(self.client.get(SITES, &query).await?)
    }

    async fn get(&self, id: &str) -> Result<Site> {
        Ok(self.client.get(&site_path(id), &[]).await?)
    }

    async fn create(&self, site: &Site) -> Result<Site> {
        Ok(self.client.post(SITES, site).await?)
    }

    async fn update(&self, id: &str, site: &Site) -> Result<Site> {
        Ok(self.client.put(&site_path(id), site).await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Ok(self.client.delete(&site_path(id)).await?)
    }

    async fn list_outbound_routes_page(
        &self,
        site_id: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<EntityListing<OutboundRoute>> {
        let path = format!("{}/outboundroutes", site_path(site_id));
        Ok(self.client.get(&path, &paging(page_size, page_number)).await?)
    }

    async fn create_outbound_route(&self, site_id: &str, route: &OutboundRoute) -> Result<OutboundRoute> {
        Ok(self.client.post(&format!("{}/outboundroutes", site_path(site_id)), route).await?)
    }

    async fn update_outbound_route(
        &self,
        site_id: &str,
        route_id: &str,
        route: &OutboundRoute,
    ) -> Result<OutboundRoute> {
        let path = format!("{}/outboundroutes/{}", site_path(site_id), encode(route_id));
        Ok(self.client.put(&path, route).await?)
    }

    async fn delete_outbound_route(&self, site_id: &str, route_id: &str) -> Result<()> {
        let path = format!("{}/outboundroutes/{}", site_path(site_id), encode(route_id));
        Ok(self.client.delete(&path).await?)
    }

    async fn get_number_plans(&self, site_id: &str) -> Result<Vec<NumberPlan>> {
        Ok(self.client.get(&format!("{}/numberplans", site_path(site_id)), &[]).await?)
    }

    async fn put_number_plans(&self, site_id: &str, plans: &[NumberPlan]) -> Result<Vec<NumberPlan>> {
        Ok(self.client.put(&format!("{}/numberplans", site_path(site_id)), plans).await?)
    }

    async fn get_location(&self, location_id: &str) -> Result<Location> {
        Ok(self.client.get(&format!("{LOCATIONS}/{}", encode(location_id)), &[]).await?)
    }

    async fn get_media_regions(&self) -> Result<MediaRegions> {
        Ok(self.client.get(MEDIA_REGIONS, &[]).await?)
    }
}
