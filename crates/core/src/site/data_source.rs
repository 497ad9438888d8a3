//! `telephony_providers_edges_site` data source: name + partition → id

use std::sync::Arc;

use async_trait::async_trait;
use dialplane_domain::constants::{NAME_LOOKUP_PAGE_SIZE, SITE_RESOURCE};
use dialplane_domain::{Diagnostic, Diagnostics, ResourceData, TimeoutConfig};
use tracing::{debug, instrument};

use super::ports::SiteApi;
use crate::adapter::{DataSource, Diagnose};
use crate::context::OperationContext;
use crate::paging::find_first_by_name;
use crate::polling::{classify, poll};

pub struct SiteDataSource {
    api: Arc<dyn SiteApi>,
    timeouts: TimeoutConfig,
}

impl SiteDataSource {
    pub fn new(api: Arc<dyn SiteApi>, timeouts: TimeoutConfig) -> Self {
        Self { api, timeouts }
    }
}

#[async_trait]
impl DataSource for SiteDataSource {
    fn type_name(&self) -> &'static str {
        SITE_RESOURCE
    }

    /// `managed` defaults to false, matching the platform's default listing.
    #[instrument(skip_all)]
    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        let Some(name) = data.get_string("name") else {
            return Diagnostic::error("name is required to look up a site").into();
        };
        let managed = data.get_bool("managed").unwrap_or(false);

        let api = self.api.as_ref();
        let wanted = name.as_str();
        let lookup = poll(self.timeouts.read(), self.timeouts.poll_interval(), move || async move {
            find_first_by_name("sites", wanted, NAME_LOOKUP_PAGE_SIZE, |size, number| {
                api.list_page(size, number, managed, Some(wanted))
            })
            .await
            .map_err(classify)
        });

        match ctx.run("lookup", lookup).await.diagnose(|| format!("Failed to find site {name}")) {
            Ok(site) => match site.id {
                Some(id) => {
                    debug!(site_id = %id, name = %name, managed, "resolved site");
                    data.set_id(id);
                    Diagnostics::new()
                }
                None => Diagnostic::error(format!("Site {name} was returned without an id")).into(),
            },
            Err(diagnostics) => diagnostics,
        }
    }
}
