//! Programmable fake for `ContactListApi`

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dialplane_core::ContactListApi;
use dialplane_domain::{ContactList, DialplaneError, EntityListing, Result};

#[derive(Default)]
struct State {
    lists: Vec<ContactList>,
    /// Name-filtered listings that come back empty before the list shows up.
    hidden_lookups: u32,
    next_id: u32,
}

#[derive(Default)]
pub struct FakeContactListApi {
    state: Mutex<State>,
    pub gets: AtomicU32,
    pub list_pages: AtomicU32,
    pub creates: AtomicU32,
    pub deletes: AtomicU32,
}

impl FakeContactListApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().lists.push(ContactList {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            version: Some(1),
            ..ContactList::default()
        });
        self
    }

    /// The next `lookups` name-filtered listings see nothing (eventual
    /// consistency of the search index).
    pub fn hidden_for(self, lookups: u32) -> Self {
        self.state.lock().unwrap().hidden_lookups = lookups;
        self
    }
}

#[async_trait]
impl ContactListApi for FakeContactListApi {
    async fn list_page(
        &self,
        page_size: u32,
        page_number: u32,
        name: Option<&str>,
    ) -> Result<EntityListing<ContactList>> {
        self.list_pages.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if name.is_some() && state.hidden_lookups > 0 {
            state.hidden_lookups -= 1;
            return Ok(EntityListing::default());
        }
        // Server-side filtering is a substring match.
        let page = state
            .lists
            .iter()
            .filter(|list| match (name, list.name.as_deref()) {
                (Some(wanted), Some(actual)) => actual.contains(wanted),
                (Some(_), None) => false,
                (None, _) => true,
            })
            .skip(((page_number - 1) * page_size) as usize)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(EntityListing::of(page))
    }

    async fn get(&self, id: &str) -> Result<ContactList> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        state
            .lists
            .iter()
            .find(|list| list.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| DialplaneError::NotFound(format!("contact list {id}")))
    }

    async fn create(&self, contact_list: &ContactList) -> Result<ContactList> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = contact_list.clone();
        created.id = Some(format!("list-{}", state.next_id));
        created.version = Some(1);
        state.lists.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, contact_list: &ContactList) -> Result<ContactList> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .lists
            .iter_mut()
            .find(|list| list.id.as_deref() == Some(id))
            .ok_or_else(|| DialplaneError::NotFound(format!("contact list {id}")))?;
        if stored.version != contact_list.version {
            return Err(DialplaneError::BadRequest("version mismatch".to_string()));
        }
        let version = stored.version.unwrap_or(0) + 1;
        *stored = ContactList { id: Some(id.to_string()), version: Some(version), ..contact_list.clone() };
        Ok(stored.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let before = state.lists.len();
        state.lists.retain(|list| list.id.as_deref() != Some(id));
        if state.lists.len() == before {
            return Err(DialplaneError::NotFound(format!("contact list {id}")));
        }
        Ok(())
    }
}
