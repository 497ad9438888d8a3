//! `outbound_contact_list` resource adapter

use std::sync::Arc;

use async_trait::async_trait;
use dialplane_common::resilience::Retryable;
use dialplane_domain::constants::{CONTACT_LIST_LABEL, CONTACT_LIST_RESOURCE};
use dialplane_domain::{
    Block, ContactList, ContactPhoneColumn, Diagnostics, DialplaneError, ResourceData,
    ResourceIdMetaMap, ResourceMeta, Result, TimeoutConfig,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use super::ports::ContactListApi;
use crate::adapter::{failure, require_id, settle, Diagnose, ResourceAdapter};
use crate::context::OperationContext;
use crate::fields::{reference, reference_id, string_list};
use crate::paging::collect_pages;
use crate::polling::{classify, poll};

pub struct ContactListResource {
    api: Arc<dyn ContactListApi>,
    timeouts: TimeoutConfig,
    page_size: u32,
}

fn build_contact_list(data: &ResourceData) -> ContactList {
    let root = data.view();
    ContactList {
        name: root.get_string("name"),
        division: reference(root, "division_id"),
        column_names: Some(root.get_string_list("column_names")),
        phone_columns: Some(root.get_blocks("phone_columns").into_iter().map(phone_column).collect()),
        preview_mode_column_name: root.get_string("preview_mode_column_name"),
        preview_mode_accepted_values: Some(root.get_string_list("preview_mode_accepted_values")),
        attempt_limits: reference(root, "attempt_limit_id"),
        automatic_time_zone_mapping: root.get_bool("automatic_time_zone_mapping"),
        zip_code_column_name: root.get_string("zip_code_column_name"),
        ..ContactList::default()
    }
}

fn phone_column(block: Block<'_>) -> ContactPhoneColumn {
    ContactPhoneColumn {
        column_name: block.get_string("column_name"),
        column_type: block.get_string("type"),
        callable_time_column: block.get_string("callable_time_column"),
    }
}

fn flatten_contact_list(data: &mut ResourceData, list: &ContactList) {
    data.set_nillable("name", list.name.clone());
    data.set_nillable("division_id", reference_id(list.division.as_ref()));
    if let Some(columns) = &list.column_names {
        data.set("column_names", string_list(columns));
    }
    if let Some(columns) = &list.phone_columns {
        let columns: Vec<Value> = columns
            .iter()
            .map(|c| {
                json!({
                    "column_name": c.column_name,
                    "type": c.column_type,
                    "callable_time_column": c.callable_time_column,
                })
            })
            .collect();
        data.set("phone_columns", columns);
    }
    data.set_nillable("preview_mode_column_name", list.preview_mode_column_name.clone());
    if let Some(values) = &list.preview_mode_accepted_values {
        data.set("preview_mode_accepted_values", string_list(values));
    }
    data.set_nillable("attempt_limit_id", reference_id(list.attempt_limits.as_ref()));
    data.set_nillable("automatic_time_zone_mapping", list.automatic_time_zone_mapping);
    data.set_nillable("zip_code_column_name", list.zip_code_column_name.clone());
}

/// Validation the platform would otherwise reject with a bare 400.
fn validate(list: &ContactList) -> Result<()> {
    let columns = list.column_names.as_deref().unwrap_or_default();
    let known = |name: Option<&String>| name.map_or(true, |n| columns.contains(n));

    for phone in list.phone_columns.iter().flatten() {
        if !known(phone.column_name.as_ref()) {
            return Err(DialplaneError::InvalidInput(format!(
                "phone column '{}' is not one of column_names",
                phone.column_name.as_deref().unwrap_or_default()
            )));
        }
    }
    if !known(list.preview_mode_column_name.as_ref()) {
        return Err(DialplaneError::InvalidInput(
            "preview_mode_column_name is not one of column_names".to_string(),
        ));
    }
    Ok(())
}

impl ContactListResource {
    pub fn new(api: Arc<dyn ContactListApi>, timeouts: TimeoutConfig, page_size: u32) -> Self {
        Self { api, timeouts, page_size }
    }

    async fn fetch_visible(&self, id: &str) -> Result<ContactList> {
        let api = self.api.as_ref();
        poll(self.timeouts.read(), self.timeouts.poll_interval(), move || async move {
            match api.get(id).await {
                Ok(list) => Ok(list),
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
                Err(err) => Err(Retryable::Fatal(err)),
                Ok(_) => Err(Retryable::Transient(DialplaneError::Pending(format!(
                    "{CONTACT_LIST_LABEL} {id} still exists"
                )))),
            }
        })
        .await
    }

    async fn read_contact_list(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> std::result::Result<Diagnostics, Diagnostics> {
        let id = require_id(data, "read")?;
        let list = ctx
            .run("read", self.fetch_visible(&id))
            .await
            .diagnose(|| format!("Failed to read {CONTACT_LIST_LABEL} {id}"))?;
        flatten_contact_list(data, &list);
        Ok(Diagnostics::new())
    }

    async fn create_contact_list(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> std::result::Result<Diagnostics, Diagnostics> {
        let body = build_contact_list(data);
        let name = body.name.clone().unwrap_or_default();
        validate(&body).diagnose(|| format!("Invalid {CONTACT_LIST_LABEL} {name}"))?;

        info!(name = %name, "creating outbound contact list");
        let created = ctx
            .run("create", self.api.create(&body))
            .await
            .diagnose(|| format!("Failed to create {CONTACT_LIST_LABEL} {name}"))?;
        let id = created
            .id
            .ok_or_else(|| DialplaneError::Internal("create response has no id".to_string()))
            .diagnose(|| format!("Failed to create {CONTACT_LIST_LABEL} {name}"))?;
        data.set_id(id);

        self.read_contact_list(ctx, data).await
    }

    async fn update_contact_list(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> std::result::Result<Diagnostics, Diagnostics> {
        let id = require_id(data, "update")?;
        let mut body = build_contact_list(data);
        validate(&body).diagnose(|| format!("Invalid {CONTACT_LIST_LABEL} {id}"))?;

        ctx.run("update", async {
            let current = self.api.get(&id).await?;
            body.version = current.version;
            self.api.update(&id, &body).await
        })
        .await
        .diagnose(|| format!("Failed to update {CONTACT_LIST_LABEL} {id}"))?;

        info!(contact_list_id = %id, "updated outbound contact list");
        self.read_contact_list(ctx, data).await
    }

    async fn delete_contact_list(
        &self,
        ctx: &OperationContext,
        data: &mut ResourceData,
    ) -> std::result::Result<Diagnostics, Diagnostics> {
        let id = require_id(data, "delete")?;

        match ctx.run("delete", self.api.delete(&id)).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                warn!(contact_list_id = %id, "outbound contact list already gone");
            }
            Err(err) => {
                return Err(failure(format!("Failed to delete {CONTACT_LIST_LABEL} {id}"), &err));
            }
        }

        ctx.run("confirm delete", self.confirm_deleted(&id))
            .await
            .diagnose(|| format!("Error deleting {CONTACT_LIST_LABEL} {id}"))?;

        info!(contact_list_id = %id, "deleted outbound contact list");
        data.clear_id();
        Ok(Diagnostics::new())
    }
}

#[async_trait]
impl ResourceAdapter for ContactListResource {
    fn type_name(&self) -> &'static str {
        CONTACT_LIST_RESOURCE
    }

    #[instrument(skip_all)]
    async fn create(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.create_contact_list(ctx, data).await)
    }

    #[instrument(skip_all, fields(contact_list_id = data.id().unwrap_or_default()))]
    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.read_contact_list(ctx, data).await)
    }

    #[instrument(skip_all, fields(contact_list_id = data.id().unwrap_or_default()))]
    async fn update(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.update_contact_list(ctx, data).await)
    }

    #[instrument(skip_all, fields(contact_list_id = data.id().unwrap_or_default()))]
    async fn delete(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics {
        settle(self.delete_contact_list(ctx, data).await)
    }

    async fn export_all(
        &self,
        ctx: &OperationContext,
    ) -> std::result::Result<ResourceIdMetaMap, Diagnostics> {
        let api = self.api.as_ref();
        let listing =
            collect_pages(self.page_size, |size, number| api.list_page(size, number, None), |_| true);
        let lists = ctx.run("export", listing).await.diagnose(|| "Failed to get contact lists")?;

        Ok(lists
            .into_iter()
            .filter_map(|list| {
                let id = list.id?;
                let name = list.name.unwrap_or_else(|| id.clone());
                Some((id, ResourceMeta::named(name)))
            })
            .collect())
    }
}
