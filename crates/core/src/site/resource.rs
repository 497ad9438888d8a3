//! `telephony_providers_edges_site` resource adapter

use std::sync::Arc;

use async_trait::async_trait;
use dialplane_common::resilience::Retryable;
use dialplane_domain::constants::{SITE_LABEL, SITE_RESOURCE};
use dialplane_domain::{
    Diagnostic, Diagnostics, DialplaneError, ResourceData, ResourceIdMetaMap, ResourceMeta, Result,
    Site, TimeoutConfig,
};
use tracing::{info, instrument, warn};

use super::ports::SiteApi;
use super::routes::{
    check_media_regions, fetch_site_location, list_routes, reconcile_routes, replace_number_plans,
};
use super::schema::{
    build_number_plans, build_routes, build_site, flatten_number_plans, flatten_routes, flatten_site,
};
use crate::adapter::{failure, require_id, settle, Diagnose, ResourceAdapter};
use crate::context::OperationContext;
use crate::paging::{collect_live, Listed};
use crate::polling::{classify, poll};

type Outcome = std::result::Result<Diagnostics, Diagnostics>;

pub struct SiteResource {
    api: Arc<dyn SiteApi>,
    timeouts: TimeoutConfig,
    page_size: u32,
}

impl SiteResource {
    pub fn new(api: Arc<dyn SiteApi>, timeouts: TimeoutConfig, page_size: u32) -> Self {
        Self { api, timeouts, page_size }
    }

    /// Location and media region checks shared by create and update.
    async fn validate(&self, site: &Site) -> Result<()> {
        if let Some(location_id) = site.location.as_ref().and_then(|l| l.id.as_deref()) {
            fetch_site_location(self.api.as_ref(), location_id).await?;
        }
        if let Some(requested) = &site.media_regions {
            let available = self.api.get_media_regions().await?;
            check_media_regions(&available, requested)?;
        }
        Ok(())
    }

    /// Push routes and number plans after the site itself is written.
    async fn write_owned(&self, site_id: &str, data: &ResourceData) -> Result<()> {
        let plans = build_number_plans(data);
        replace_number_plans(self.api.as_ref(), site_id, &plans).await?;
        let routes = build_routes(data)?;
        reconcile_routes(self.api.as_ref(), site_id, &routes).await
    }

    async fn fetch_visible(&self, id: &str) -> Result<Site> {
        let api = self.api.as_ref();
        poll(self.timeouts.read(), self.timeouts.poll_interval(), move || async move {
            match api.get(id).await {
                Ok(site) => Ok(site),
                Err(err) if err.is_not_found() => Err(Retryable::Transient(err)),
                Err(err) => Err(classify(err)),
            }
        })
        .await
    }

    async fn confirm_deleted(&self, id: &str) -> Result<()> {
        let api = self.api.as_ref();
        poll(self.timeouts.delete(), self.timeouts.poll_interval(), move || async move {
            match api.get(id).await {
                Err(err) if err.is_not_found() => Ok(()),
                Ok(site) if site.is_soft_deleted() => Ok(()),
                Err(err) => Err(Retryable::Fatal(err)),
                Ok(_) => Err(Retryable::Transient(DialplaneError::Pending(format!(
                    "{SITE_LABEL} {id} still exists"
                )))),
            }
        })
        .await
    }

    async fn create_site(&self, ctx: &OperationContext, data: &mut ResourceData) -> Outcome {
        let body = build_site(data);
        let name = body.name.clone().unwrap_or_default();
        build_routes(data).diagnose(|| format!("Invalid outbound routes for {SITE_LABEL} {name}"))?;
        ctx.run("validate", self.validate(&body))
            .await
            .diagnose(|| format!("Invalid {SITE_LABEL} {name}"))?;

        info!(name = %name, "creating site");
        let created = ctx
            .run("create", self.api.create(&body))
            .await
            .diagnose(|| format!("Failed to create {SITE_LABEL} {name}"))?;
        let id = created
            .id
            .ok_or_else(|| DialplaneError::Internal("create response has no id".to_string()))
            .diagnose(|| format!("Failed to create {SITE_LABEL} {name}"))?;
        data.set_id(id.clone());

        ctx.run("owned resources", self.write_owned(&id, data))
            .await
            .diagnose(|| format!("Failed to configure routes and number plans for {SITE_LABEL} {id}"))?;

        info!(site_id = %id, name = %name, "created site");
        self.read_site(ctx, data).await
    }

    async fn read_site(&self, ctx: &OperationContext, data: &mut ResourceData) -> Outcome {
        let id = require_id(data, "read")?;
        let site = ctx
            .run("read", self.fetch_visible(&id))
            .await
            .diagnose(|| format!("Failed to read {SITE_LABEL} {id}"))?;

        if site.is_soft_deleted() {
            warn!(site_id = %id, "site was deleted outside of configuration");
            data.clear_id();
            return Ok(Diagnostic::warning(format!("{SITE_LABEL} {id} has been deleted")).into());
        }

        let api = self.api.as_ref();
        let (routes, plans) = ctx
            .run("read owned", async {
                let routes = list_routes(api, &id).await?;
                let plans = api.get_number_plans(&id).await?;
                Ok::<_, DialplaneError>((routes, plans))
            })
            .await
            .diagnose(|| format!("Failed to read routes and number plans for {SITE_LABEL} {id}"))?;

        flatten_site(data, &site);
        flatten_routes(data, &routes);
        flatten_number_plans(data, &plans);
        Ok(Diagnostics::new())
    }

    async fn update_site(&self, ctx: &OperationContext, data: &mut ResourceData) -> Outcome {
        let id = require_id(data, "update")?;
        let mut body = build_site(data);
        build_routes(data).diagnose(|| format!("Invalid outbound routes for {SITE_LABEL} {id}"))?;
        ctx.run("validate", self.validate(&body))
            .await
            .diagnose(|| format!("Invalid {SITE_LABEL} {id}"))?;

        ctx.run("update", async {
            let current = self.api.get(&id).await?;
            body.version = current.version;
            self.api.update(&id, &body).await
        })
        .await
        .diagnose(|| format!("Failed to update {SITE_LABEL} {id}"))?;

        ctx.run("owned resources", self.write_owned(&id, data))
            .await
            .diagnose(|| format!("Failed to configure routes and number plans for {SITE_LABEL} {id}"))?;

        info!(site_id = %id, "updated site");
        self.read_site(ctx, data).await
    }

    async fn delete_site(&self, ctx: &OperationContext, data: &mut ResourceData) -> Outcome {
        let id = require_id(data, "delete")?;

        match ctx.run("delete", self.api.delete(&id)).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => warn!(site_id = %id, "site already gone"),
            Err(err) => return Err(failure(format!("Failed to delete {SITE_LABEL} {id}"), &err)),
        }

        ctx.run("confirm delete", self.confirm_deleted(&id))
            .await
            .diagnose(|| format!("Error deleting {SITE_LABEL} {id}"))?;

        info!(site_id = %id, "deleted site");
        data.clear_id();
        Ok(Diagnostics::new())
    }

    async fn list_partition(&self, managed: bool) -> Result<Vec<Site>> {
        let api = self.api.as_ref();
        collect_live(self.page_size, |size, number| api.list_page(size, number, managed, None)).await
    }
}

#[async_trait]
impl ResourceAdapter for SiteResource {
    fn type_name(&self) -> &'static str {
        SITE_RESOURCE
    }

    #[instrument(skip_all)]
    async fn create(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.create_site(ctx, data).await)
    }

    #[instrument(skip_all, fields(site_id = data.id().unwrap_or_default()))]
    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.read_site(ctx, data).await)
    }

    #[instrument(skip_all, fields(site_id = data.id().unwrap_or_default()))]
    async fn update(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.update_site(ctx, data).await)
    }

    #[instrument(skip_all, fields(site_id = data.id().unwrap_or_default()))]
    async fn delete(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.delete_site(ctx, data).await)
    }

    /// Managed and unmanaged sites, with the partition recorded as the
    /// `managed` attribute.
    async fn export_all(
        &self,
        ctx: &OperationContext,
    ) -> std::result::Result<ResourceIdMetaMap, Diagnostics> {
        let mut resources = ResourceIdMetaMap::new();

        for managed in [true, false] {
            let sites = ctx
                .run("export", self.list_partition(managed))
                .await
                .diagnose(|| format!("Failed to get {} sites", if managed { "managed" } else { "unmanaged" }))?;

            for site in sites {
                let Some(id) = site.id else { continue };
                let name = site.name.unwrap_or_else(|| id.clone());
                resources.insert(id, ResourceMeta::named(name).with_attribute("managed", managed));
            }
        }

        Ok(resources)
    }
}
