//! Shared wire types: entity references, paged listings, lifecycle state

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to another platform entity, usually by id only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEntityRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_uri: Option<String>,
}

impl DomainEntityRef {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), ..Self::default() }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// One page of a listing endpoint.
///
/// Only `entities` is relied on; paging stops at the first page with no
/// entities rather than trusting `page_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityListing<T> {
    #[serde(default)]
    pub entities: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl<T> Default for EntityListing<T> {
    fn default() -> Self {
        Self { entities: None, page_size: None, page_number: None, total: None, page_count: None }
    }
}

impl<T> EntityListing<T> {
    pub fn of(entities: Vec<T>) -> Self {
        Self { entities: Some(entities), ..Self::default() }
    }

    /// Entities on this page, treating an absent list as empty.
    pub fn into_entities(self) -> Vec<T> {
        self.entities.unwrap_or_default()
    }
}

/// Lifecycle state of telephony entities (sites, routes, number plans).
///
/// `deleted` marks a soft-deleted entity that is still returned by some
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityState {
    Active,
    Inactive,
    Deleted,
    Other(String),
}

impl EntityState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Deleted => "deleted",
            Self::Other(s) => s,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl From<String> for EntityState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            "deleted" => Self::Deleted,
            _ => Self::Other(s),
        }
    }
}

impl From<EntityState> for String {
    fn from(state: EntityState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when an optional state is present and `deleted`.
pub fn is_soft_deleted(state: Option<&EntityState>) -> bool {
    state.is_some_and(EntityState::is_deleted)
}
