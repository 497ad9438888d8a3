//! Outbound campaign wire types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::common::DomainEntityRef;
use crate::impl_wire_enum_conversions;

/// Campaign run state as reported by the platform.
///
/// `Stopping` is a transient server-side state between `on` and `off`; it is
/// never a valid target. Unknown values are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CampaignStatus {
    On,
    Off,
    Stopping,
    Other(String),
}

impl CampaignStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Stopping => "stopping",
            Self::Other(s) => s,
        }
    }

    /// Status reported in export metadata: anything but `on` reads as `off`.
    pub fn export_normalized(&self) -> Self {
        match self {
            Self::On => Self::On,
            _ => Self::Off,
        }
    }

    /// Whether the value may be requested by configuration.
    pub fn is_target(&self) -> bool {
        matches!(self, Self::On | Self::Off)
    }
}

impl From<String> for CampaignStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "on" => Self::On,
            "off" => Self::Off,
            "stopping" => Self::Stopping,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for CampaignStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<CampaignStatus> for String {
    fn from(status: CampaignStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the dialer paces calls for a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialingMode {
    Agentless,
    Preview,
    Power,
    Predictive,
    Progressive,
    External,
}

impl_wire_enum_conversions!(DialingMode {
    Agentless => "agentless",
    Preview => "preview",
    Power => "power",
    Predictive => "predictive",
    Progressive => "progressive",
    External => "external",
});

/// Phone column of the campaign's contact list that the dialer uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPhoneColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

/// Ordering applied to contacts before dialing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicContactQueueingSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<bool>,
}

/// Outbound dialing campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialing_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_list: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_group: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callable_time_set: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analysis_response_set: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<DomainEntityRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_columns: Option<Vec<CampaignPhoneColumn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_sorts: Option<Vec<ContactSort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnc_lists: Option<Vec<DomainEntityRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_sets: Option<Vec<DomainEntityRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_list_filters: Option<Vec<DomainEntityRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abandon_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_line_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_preview_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_time_out_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_answer_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_analysis_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_contact_queueing_settings: Option<DynamicContactQueueingSettings>,
}

impl Campaign {
    /// Current status, treating an absent member as `off`.
    pub fn status(&self) -> CampaignStatus {
        self.campaign_status.clone().unwrap_or(CampaignStatus::Off)
    }
}
