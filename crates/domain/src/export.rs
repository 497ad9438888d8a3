//! Export metadata produced by per-type exporters

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for one exported entity: its display name plus any attributes
/// the exporter wants to surface (e.g. normalized campaign status).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
}

impl ResourceMeta {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }
}

/// Entity id → metadata, ordered by id for stable output.
pub type ResourceIdMetaMap = BTreeMap<String, ResourceMeta>;
