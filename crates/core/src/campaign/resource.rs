//! `outbound_campaign` resource adapter

use std::sync::Arc;

use async_trait::async_trait;
use dialplane_domain::constants::{CAMPAIGN_LABEL, CAMPAIGN_RESOURCE};
use dialplane_domain::{
    CampaignStatus, Diagnostics, DialplaneError, ResourceData, ResourceIdMetaMap,
    ResourceMeta, TimeoutConfig,
};
use tracing::{info, instrument, warn};

use super::ports::CampaignApi;
use super::schema::{build_campaign, desired_status, flatten_campaign};
use super::status::{apply_status_change, confirm_deleted, read_settled, turn_off};
use crate::adapter::{failure, require_id, settle, Diagnose, ResourceAdapter};
use crate::context::OperationContext;
use crate::paging::collect_pages;

/// Adapter for outbound campaigns.
pub struct CampaignResource {
    api: Arc<dyn CampaignApi>,
    timeouts: TimeoutConfig,
    page_size: u32,
}

impl CampaignResource {
    pub fn new(api: Arc<dyn CampaignApi>, timeouts: TimeoutConfig, page_size: u32) -> Self {
        Self { api, timeouts, page_size }
    }

    async fn create_campaign(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> Result<Diagnostics, Diagnostics> {
        let status = desired_status(data).diagnose(|| "Invalid campaign_status")?;
        let mut body = build_campaign(data).diagnose(|| "Invalid Outbound Campaign configuration")?;
        let name = body.name.clone().unwrap_or_default();
        // Campaigns are always created off; enabling is a separate call.
        body.campaign_status = Some(CampaignStatus::Off);

        info!(name = %name, "creating outbound campaign");
        let created = ctx
            .run("create", self.api.create(&body))
            .await
            .diagnose(|| format!("Failed to create {CAMPAIGN_LABEL} {name}"))?;
        let id = created
            .id
            .clone()
            .ok_or_else(|| DialplaneError::Internal("create response has no id".to_string()))
            .diagnose(|| format!("Failed to create {CAMPAIGN_LABEL} {name}"))?;
        data.set_id(id.clone());

        if status == Some(CampaignStatus::On) {
            ctx.run("enable", apply_status_change(self.api.as_ref(), &created, &CampaignStatus::On))
                .await
                .diagnose(|| format!("Failed to turn on {CAMPAIGN_LABEL} {id}"))?;
        }

        info!(campaign_id = %id, name = %name, "created outbound campaign");
        self.read_campaign(ctx, data).await
    }

    async fn read_campaign(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> Result<Diagnostics, Diagnostics> {
        let id = require_id(data, "read")?;
        let campaign = ctx
            .run("read", read_settled(self.api.as_ref(), &id, &self.timeouts))
            .await
            .diagnose(|| format!("Failed to read {CAMPAIGN_LABEL} {id}"))?;

        flatten_campaign(data, &campaign);
        info!(campaign_id = %id, name = campaign.name.as_deref().unwrap_or_default(), "read outbound campaign");
        Ok(Diagnostics::new())
    }

    async fn update_campaign(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> Result<Diagnostics, Diagnostics> {
        let id = require_id(data, "update")?;
        let status = desired_status(data).diagnose(|| "Invalid campaign_status")?;
        let mut body = build_campaign(data).diagnose(|| "Invalid Outbound Campaign configuration")?;

        let updated = ctx
            .run("update", async {
                let current = self.api.get(&id).await?;
                body.version = current.version;
                self.api.update(&id, &body).await
            })
            .await
            .diagnose(|| format!("Failed to update {CAMPAIGN_LABEL} {id}"))?;

        if let Some(status) = status {
            ctx.run("status change", apply_status_change(self.api.as_ref(), &updated, &status))
                .await
                .diagnose(|| format!("Failed to change status of {CAMPAIGN_LABEL} {id}"))?;
        }

        info!(campaign_id = %id, "updated outbound campaign");
        self.read_campaign(ctx, data).await
    }

    async fn delete_campaign(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> Result<Diagnostics, Diagnostics> {
        let id = require_id(data, "delete")?;

        // Campaigns have to be off before the platform accepts a delete.
        if data.get_str("campaign_status") != Some(CampaignStatus::Off.as_str()) {
            info!(campaign_id = %id, "turning off outbound campaign before deletion");
            ctx.run("turn off", turn_off(self.api.as_ref(), &id, &self.timeouts))
                .await
                .diagnose(|| format!("Failed to turn off {CAMPAIGN_LABEL} {id}"))?;
        }

        match ctx.run("delete", self.api.delete(&id)).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                warn!(campaign_id = %id, "outbound campaign already gone");
            }
            Err(err) => {
                return Err(failure(format!("Failed to delete {CAMPAIGN_LABEL} {id}"), &err));
            }
        }

        ctx.run("confirm delete", confirm_deleted(self.api.as_ref(), &id, &self.timeouts))
            .await
            .diagnose(|| format!("Error deleting {CAMPAIGN_LABEL} {id}"))?;

        data.clear_id();
        Ok(Diagnostics::new())
    }
}

#[async_trait]
impl ResourceAdapter for CampaignResource {
    fn type_name(&self) -> &'static str {
        CAMPAIGN_RESOURCE
    }

    #[instrument(skip_all)]
    async fn create(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.create_campaign(ctx, data).await)
    }

    #[instrument(skip_all, fields(campaign_id = data.id().unwrap_or_default()))]
    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.read_campaign(ctx, data).await)
    }

    #[instrument(skip_all, fields(campaign_id = data.id().unwrap_or_default()))]
    async fn update(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.update_campaign(ctx, data).await)
    }

    #[instrument(skip_all, fields(campaign_id = data.id().unwrap_or_default()))]
    async fn delete(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.delete_campaign(ctx, data).await)
    }

    /// Status outside `on`/`off` is reported as `off`; the remote campaign
    /// is left untouched.
    async fn export_all(&self, ctx: &OperationContext) -> Result<ResourceIdMetaMap, Diagnostics> {
        let api = self.api.as_ref();
        let listing = collect_pages(self.page_size, |size, number| api.list_page(size, number), |_| true);
        let campaigns = ctx
            .run("export", listing)
            .await
            .diagnose(|| "Failed to get campaigns")?;

        let mut resources = ResourceIdMetaMap::new();
        for campaign in campaigns {
            let Some(id) = campaign.id.clone() else {
                warn!("skipping campaign without id");
                continue;
            };
            let status = campaign.status().export_normalized();
            let meta = ResourceMeta::named(campaign.name.clone().unwrap_or_else(|| id.clone()))
                .with_attribute("campaign_status", status.as_str());
            resources.insert(id, meta);
        }
        Ok(resources)
    }
}
