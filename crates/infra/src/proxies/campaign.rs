use std::sync::Arc;

use async_trait::async_trait;
use dialplane_core::CampaignApi;
use dialplane_domain::{Campaign, EntityListing, Result};
use urlencoding::encode;

use super::paging;
use crate::api::PlatformClient;

const CAMPAIGNS: &str = "/api/v2/outbound/campaigns";

pub struct RestCampaignApi {
    client: Arc<PlatformClient>,
}

impl RestCampaignApi {
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CampaignApi for RestCampaignApi {
    async fn list_page(&self, page_size: u32, page_number: u32) -> Result<EntityListing<Campaign>> {
        Ok(self.client.get(CAMPAIGNS, &paging(page_size, page_number)).await?)
    }

    async fn get(&self, id: &str) -> Result<Campaign> {
        Ok(self.client.get(&format!("{CAMPAIGNS}/{}", encode(id)), &[]).await?)
    }

    async fn create(&self, campaign: &Campaign) -> Result<Campaign> {
        Ok(self.client.post(CAMPAIGNS, campaign).await?)
    }

    async fn update(&self, id: &str, campaign: &Campaign) -> Result<Campaign> {
        Ok(self.client.put(&format!("{CAMPAIGNS}/{}", encode(id)), campaign).await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Ok(self.client.delete(&format!("{CAMPAIGNS}/{}", encode(id))).await?)
    }
}
