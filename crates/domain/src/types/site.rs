//! Telephony site wire types

use serde::{Deserialize, Serialize};

use super::common::{DomainEntityRef, EntityState};

/// Telephony site. Owns its outbound routes and number plans, which are
/// served from sub-resources rather than embedded here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EntityState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_regions_use_latency_based: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_sites: Option<Vec<DomainEntityRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_sites: Option<Vec<DomainEntityRef>>,
}
