//! Port interface for the outbound contact list API

use async_trait::async_trait;
use dialplane_domain::{ContactList, EntityListing, Result};

#[async_trait]
pub trait ContactListApi: Send + Sync {
    /// One page of contact lists, optionally filtered server-side by name.
    async fn list_page(
        &self,
        page_size: u32,
        page_number: u32,
        name: Option<&str>,
    ) -> Result<EntityListing<ContactList>>;

    async fn get(&self, id: &str) -> Result<ContactList>;

    async fn create(&self, contact_list: &ContactList) -> Result<ContactList>;

    async fn update(&self, id: &str, contact_list: &ContactList) -> Result<ContactList>;

    async fn delete(&self, id: &str) -> Result<()>;
}
