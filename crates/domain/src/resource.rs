//! Declarative resource state exchanged with the configuration engine
//!
//! A resource is an optional id plus a flat map of attributes. Nested blocks
//! (phone columns, routes, number plans) are lists of JSON objects. Empty
//! strings and nulls read as "unset", mirroring how the engine reports
//! attributes that were never configured.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only view over one attribute map (the resource root or a nested
/// block).
#[derive(Debug, Clone, Copy)]
pub struct Block<'a>(&'a Map<String, Value>);

impl<'a> Block<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self(map)
    }

    /// Raw value, with `null` treated as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Non-empty string value.
    pub fn get_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_str(key).map(str::to_string)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String list; absent or non-string members are skipped.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Nested block list in declaration order.
    pub fn get_blocks(&self, key: &str) -> Vec<Block<'a>> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).map(Block).collect())
            .unwrap_or_default()
    }

    /// First element of a single-item block list.
    pub fn get_block(&self, key: &str) -> Option<Block<'a>> {
        self.get_blocks(key).into_iter().next()
    }
}

/// State of one declarative resource instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), attributes: Map::new() }
    }

    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self { id: None, attributes }
    }

    /// Builder-style setter, mostly for assembling desired state.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Marks the resource as gone remotely.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn view(&self) -> Block<'_> {
        Block(&self.attributes)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.view().get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.view().get_str(key)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.view().get_string(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.view().get_i64(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.view().get_f64(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.view().get_bool(key)
    }

    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.view().get_string_list(key)
    }

    pub fn get_blocks(&self, key: &str) -> Vec<Block<'_>> {
        self.view().get_blocks(key)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Set `value`, or `null` when absent, so stale state is overwritten.
    pub fn set_nillable<T: Into<Value>>(&mut self, key: &str, value: Option<T>) {
        self.attributes.insert(key.to_string(), value.map_or(Value::Null, Into::into));
    }
}
