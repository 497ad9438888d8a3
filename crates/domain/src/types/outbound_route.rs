//! Site outbound route wire types

use serde::{Deserialize, Serialize};

use super::common::{DomainEntityRef, EntityState};
use crate::impl_wire_enum_conversions;

/// Order in which a route's trunks are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDistribution {
    Sequential,
    Random,
}

impl_wire_enum_conversions!(RouteDistribution {
    Sequential => "SEQUENTIAL",
    Random => "RANDOM",
});

/// Outbound route owned by exactly one site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_trunk_bases: Option<Vec<DomainEntityRef>>,
}
