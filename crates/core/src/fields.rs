//! Helpers for mapping entity references to and from flat attributes

use dialplane_domain::{Block, DomainEntityRef};
use serde_json::Value;

/// `key` holding an id becomes a reference to that entity.
pub fn reference(block: Block<'_>, key: &str) -> Option<DomainEntityRef> {
    block.get_str(key).map(DomainEntityRef::with_id)
}

/// `key` holding a list of ids becomes a list of references.
pub fn references(block: Block<'_>, key: &str) -> Vec<DomainEntityRef> {
    block.get_string_list(key).into_iter().map(DomainEntityRef::with_id).collect()
}

pub fn reference_id(reference: Option<&DomainEntityRef>) -> Option<String> {
    reference.and_then(|r| r.id.clone())
}

/// Ids of a reference list as a JSON array.
pub fn reference_ids(references: &[DomainEntityRef]) -> Value {
    Value::Array(references.iter().filter_map(|r| r.id.clone()).map(Value::String).collect())
}

pub fn string_list(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

/// Non-empty list or `None`, so unset lists stay out of request bodies.
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
