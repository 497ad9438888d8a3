//! Paginated enumeration and name-to-id resolution
//!
//! Listing endpoints are walked page by page starting at 1 until a page
//! comes back empty. Page errors abort the walk; there is no retry at this
//! layer and no partial result.

use std::future::Future;

use dialplane_domain::{
    is_soft_deleted, Campaign, ContactList, DialplaneError, EntityListing, OutboundRoute, Result,
    Site,
};
use tracing::debug;

/// Entities that can be enumerated and looked up by name.
pub trait Listed {
    fn id(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;

    /// Soft-deleted entities are still served by some listings.
    fn is_soft_deleted(&self) -> bool {
        false
    }
}

impl Listed for Campaign {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Listed for ContactList {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Listed for Site {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_soft_deleted(&self) -> bool {
        is_soft_deleted(self.state.as_ref())
    }
}

impl Listed for OutboundRoute {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_soft_deleted(&self) -> bool {
        is_soft_deleted(self.state.as_ref())
    }
}

/// Walk pages `1..` of size `page_size` until an empty page, keeping the
/// entities accepted by `keep` in server order.
///
/// # Errors
/// The first page error, unchanged.
pub async fn collect_pages<T, F, Fut, K>(page_size: u32, mut fetch: F, keep: K) -> Result<Vec<T>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<EntityListing<T>>>,
    K: Fn(&T) -> bool,
{
    let mut collected = Vec::new();
    let mut page_number = 1;

    loop {
        let entities = fetch(page_size, page_number).await?.into_entities();
        if entities.is_empty() {
            break;
        }
        collected.extend(entities.into_iter().filter(|entity| keep(entity)));
        page_number += 1;
    }

    debug!(pages = page_number - 1, count = collected.len(), "collected listing");
    Ok(collected)
}

/// [`collect_pages`] that drops soft-deleted entities.
pub async fn collect_live<T, F, Fut>(page_size: u32, fetch: F) -> Result<Vec<T>>
where
    T: Listed,
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<EntityListing<T>>>,
{
    collect_pages(page_size, fetch, |entity: &T| !entity.is_soft_deleted()).await
}

/// Find the first live entity whose name equals `name` exactly.
///
/// `fetch` is expected to filter server-side by name; matching here is still
/// exact and case-sensitive because the server filter is a prefix/fuzzy
/// match. An empty page before any match yields `DialplaneError::Pending`,
/// which callers retry while the entity becomes visible.
///
/// # Errors
/// `Pending` when no match exists yet, or the first page error.
pub async fn find_first_by_name<T, F, Fut>(
    kind: &str,
    name: &str,
    page_size: u32,
    mut fetch: F,
) -> Result<T>
where
    T: Listed,
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<EntityListing<T>>>,
{
    let mut page_number = 1;

    loop {
        let entities = fetch(page_size, page_number).await?.into_entities();
        if entities.is_empty() {
            return Err(DialplaneError::Pending(format!("no {kind} found with name {name}")));
        }

        if let Some(found) = entities
            .into_iter()
            .find(|entity| entity.name() == Some(name) && !entity.is_soft_deleted())
        {
            return Ok(found);
        }
        page_number += 1;
    }
}
