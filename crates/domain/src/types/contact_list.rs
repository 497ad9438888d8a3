//! Outbound contact list wire types

use serde::{Deserialize, Serialize};

use super::common::DomainEntityRef;

/// Phone-number column of a contact list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPhoneColumn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callable_time_column: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_columns: Option<Vec<ContactPhoneColumn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_mode_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_mode_accepted_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_limits: Option<DomainEntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_time_zone_mapping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code_column_name: Option<String>,
}
