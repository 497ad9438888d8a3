//! Wiring of port implementations into adapters
//!
//! `Proxies` is built once per process (the REST implementations live in
//! `dialplane-infra`) and every adapter shares it.

use std::collections::BTreeMap;
use std::sync::Arc;

use dialplane_domain::ProviderConfig;

use crate::adapter::{DataSource, ResourceAdapter};
use crate::campaign::{CampaignApi, CampaignResource};
use crate::contact_list::{ContactListApi, ContactListDataSource, ContactListResource};
use crate::site::{SiteApi, SiteDataSource, SiteResource};

/// One implementation per entity API.
#[derive(Clone)]
pub struct Proxies {
    pub campaigns: Arc<dyn CampaignApi>,
    pub contact_lists: Arc<dyn ContactListApi>,
    pub sites: Arc<dyn SiteApi>,
}

/// Adapters and data sources keyed by declarative type name.
pub struct ResourceRegistry {
    resources: BTreeMap<&'static str, Arc<dyn ResourceAdapter>>,
    data_sources: BTreeMap<&'static str, Arc<dyn DataSource>>,
}

impl ResourceRegistry {
    pub fn new(proxies: &Proxies, config: &ProviderConfig) -> Self {
        let timeouts = &config.timeouts;
        let page_size = config.export.page_size;

        let resources: Vec<Arc<dyn ResourceAdapter>> = vec![
            Arc::new(CampaignResource::new(Arc::clone(&proxies.campaigns), timeouts.clone(), page_size)),
            Arc::new(ContactListResource::new(
                Arc::clone(&proxies.contact_lists),
                timeouts.clone(),
                page_size,
            )),
            Arc::new(SiteResource::new(Arc::clone(&proxies.sites), timeouts.clone(), page_size)),
        ];
        let data_sources: Vec<Arc<dyn DataSource>> = vec![
            Arc::new(ContactListDataSource::new(Arc::clone(&proxies.contact_lists), timeouts.clone())),
            Arc::new(SiteDataSource::new(Arc::clone(&proxies.sites), timeouts.clone())),
        ];

        Self {
            resources: resources.into_iter().map(|r| (r.type_name(), r)).collect(),
            data_sources: data_sources.into_iter().map(|d| (d.type_name(), d)).collect(),
        }
    }

    pub fn resource(&self, type_name: &str) -> Option<Arc<dyn ResourceAdapter>> {
        self.resources.get(type_name).cloned()
    }

    pub fn data_source(&self, type_name: &str) -> Option<Arc<dyn DataSource>> {
        self.data_sources.get(type_name).cloned()
    }

    /// Registered resource adapters in type-name order.
    pub fn resources(&self) -> impl Iterator<Item = &Arc<dyn ResourceAdapter>> {
        self.resources.values()
    }

    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }
}
