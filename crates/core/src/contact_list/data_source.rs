//! `outbound_contact_list` data source: name → id

use std::sync::Arc;

use async_trait::async_trait;
use dialplane_domain::constants::{CONTACT_LIST_RESOURCE, NAME_LOOKUP_PAGE_SIZE};
use dialplane_domain::{Diagnostic, Diagnostics, ResourceData, TimeoutConfig};
use tracing::{debug, instrument};

use super::ports::ContactListApi;
use crate::adapter::{DataSource, Diagnose};
use crate::context::OperationContext;
use crate::paging::find_first_by_name;
use crate::polling::{classify, poll};

pub struct ContactListDataSource {
    api: Arc<dyn ContactListApi>,
    timeouts: TimeoutConfig,
}

impl ContactListDataSource {
    pub fn new(api: Arc<dyn ContactListApi>, timeouts: TimeoutConfig) -> Self {
        Self { api, timeouts }
    }
}

#[async_trait]
impl DataSource for ContactListDataSource {
    fn type_name(&self) -> &'static str {
        CONTACT_LIST_RESOURCE
    }

    #[instrument(skip_all)]
    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        let Some(name) = data.get_string("name") else {
            return Diagnostic::error("name is required to look up a contact list").into();
        };

        let api = self.api.as_ref();
        let wanted = name.as_str();
        let lookup = poll(self.timeouts.read(), self.timeouts.poll_interval(), move || async move {
            find_first_by_name("contact lists", wanted, NAME_LOOKUP_PAGE_SIZE, |size, number| {
                api.list_page(size, number, Some(wanted))
            })
            .await
            .map_err(classify)
        });

        match ctx.run("lookup", lookup).await.diagnose(|| format!("Failed to find contact list {name}")) {
            Ok(list) => match list.id {
                Some(id) => {
                    debug!(contact_list_id = %id, name = %name, "resolved contact list");
                    data.set_id(id);
                    Diagnostics::new()
                }
                None => {
                    Diagnostic::error(format!("Contact list {name} was returned without an id")).into()
                }
            },
            Err(diagnostics) => diagnostics,
        }
    }
}
