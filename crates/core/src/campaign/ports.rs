//! Port interface for the outbound campaign API

use async_trait::async_trait;
use dialplane_domain::{Campaign, EntityListing, Result};

/// Campaign endpoints. A missing campaign is reported as
/// `DialplaneError::NotFound`.
#[async_trait]
pub trait CampaignApi: Send + Sync {
    /// One page of all campaigns.
    async fn list_page(&self, page_size: u32, page_number: u32) -> Result<EntityListing<Campaign>>;

    async fn get(&self, id: &str) -> Result<Campaign>;

    async fn create(&self, campaign: &Campaign) -> Result<Campaign>;

    /// Full replacement; the body must carry the current `version`.
    async fn update(&self, id: &str, campaign: &Campaign) -> Result<Campaign>;

    async fn delete(&self, id: &str) -> Result<()>;
}
