//! Read-only reference data: locations and media regions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyNumber {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e164: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub number_type: Option<String>,
}

/// Physical location a site is bound to.
///
/// Sites may only reference locations that carry an emergency number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_number: Option<EmergencyNumber>,
}

/// Media regions available to the organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRegions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_home_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_core_regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_satellite_regions: Option<Vec<String>>,
}

impl MediaRegions {
    /// Home, core and satellite regions in that order.
    pub fn all(&self) -> Vec<&str> {
        self.aws_home_region
            .as_deref()
            .into_iter()
            .chain(self.aws_core_regions.iter().flatten().map(String::as_str))
            .chain(self.aws_satellite_regions.iter().flatten().map(String::as_str))
            .collect()
    }

    pub fn contains(&self, region: &str) -> bool {
        self.all().contains(&region)
    }
}
