use std::sync::Arc;

use async_trait::async_trait;
use dialplane_core::ContactListApi;
use dialplane_domain::{ContactList, EntityListing, Result};
use urlencoding::encode;

use super::paging;
use crate::api::PlatformClient;

const CONTACT_LISTS: &str = "/api/v2/outbound/contactlists";

pub struct RestContactListApi {
    client: Arc<PlatformClient>,
}

impl RestContactListApi {
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContactListApi for RestContactListApi {
    async fn list_page(
        &self,
        page_size: u32,
        page_number: u32,
        name: Option<&str>,
    ) -> Result<EntityListing<ContactList>> {
        let mut query = paging(page_size, page_number);
        if let Some(name) = name {
            query.push(("name", name.to_string()));
        }
        Ok(self.client.get(CONTACT_LISTS, &query).await?)
    }

    async fn get(&self, id: &str) -> Result<ContactList> {
        Ok(self.client.get(&format!("{CONTACT_LISTS}/{}", encode(id)), &[]).await?)
    }

    async fn create(&self, contact_list: &ContactList) -> Result<ContactList> {
        Ok(self.client.post(CONTACT_LISTS, contact_list).await?)
    }

    async fn update(&self, id: &str, contact_list: &ContactList) -> Result<ContactList> {
        Ok(self.client.put(&format!("{CONTACT_LISTS}/{}", encode(id)), contact_list).await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Ok(self.client.delete(&format!("{CONTACT_LISTS}/{}", encode(id))).await?)
    }
}
