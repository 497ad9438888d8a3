//! Mapping between `outbound_campaign` attributes and the wire entity

use std::str::FromStr;

use dialplane_domain::{
    Block, Campaign, CampaignPhoneColumn, CampaignStatus, ContactSort, DialingMode, DialplaneError,
    DynamicContactQueueingSettings, ResourceData, Result,
};
use serde_json::{json, Value};

use crate::fields::{non_empty, reference, reference_id, reference_ids, references};

/// Requested `campaign_status`, if configured. Only `on` and `off` are
/// valid targets.
pub fn desired_status(data: &ResourceData) -> Result<Option<CampaignStatus>> {
    let Some(raw) = data.get_str("campaign_status") else {
        return Ok(None);
    };
    let status = CampaignStatus::from(raw);
    if status.is_target() {
        Ok(Some(status))
    } else {
        Err(DialplaneError::InvalidInput(format!(
            "campaign_status must be 'on' or 'off', got '{raw}'"
        )))
    }
}

/// Request body for create/update. `campaign_status` is left unset; callers
/// decide what status the body carries.
pub fn build_campaign(data: &ResourceData) -> Result<Campaign> {
    let root = data.view();

    let dialing_mode = root
        .get_str("dialing_mode")
        .map(|mode| DialingMode::from_str(mode).map(|m| m.as_str().to_string()))
        .transpose()?;

    Ok(Campaign {
        name: root.get_string("name"),
        dialing_mode,
        contact_list: reference(root, "contact_list_id"),
        queue: reference(root, "queue_id"),
        script: reference(root, "script_id"),
        edge_group: reference(root, "edge_group_id"),
        site: reference(root, "site_id"),
        callable_time_set: reference(root, "callable_time_set_id"),
        call_analysis_response_set: reference(root, "call_analysis_response_set_id"),
        division: reference(root, "division_id"),
        phone_columns: Some(root.get_blocks("phone_columns").into_iter().map(phone_column).collect()),
        contact_sorts: non_empty(root.get_blocks("contact_sorts").into_iter().map(contact_sort).collect()),
        dnc_lists: Some(references(root, "dnc_list_ids")),
        rule_sets: Some(references(root, "rule_set_ids")),
        contact_list_filters: Some(references(root, "contact_list_filter_ids")),
        abandon_rate: root.get_f64("abandon_rate"),
        caller_name: root.get_string("caller_name"),
        caller_address: root.get_string("caller_address"),
        outbound_line_count: root.get_i64("outbound_line_count"),
        skip_preview_disabled: root.get_bool("skip_preview_disabled"),
        preview_time_out_seconds: root.get_i64("preview_time_out_seconds"),
        always_running: root.get_bool("always_running"),
        no_answer_timeout: root.get_i64("no_answer_timeout"),
        call_analysis_language: root.get_string("call_analysis_language"),
        priority: root.get_i64("priority"),
        dynamic_contact_queueing_settings: root
            .get_block("dynamic_contact_queueing_settings")
            .map(|block| DynamicContactQueueingSettings { sort: block.get_bool("sort") }),
        ..Campaign::default()
    })
}

fn phone_column(block: Block<'_>) -> CampaignPhoneColumn {
    CampaignPhoneColumn {
        column_name: block.get_string("column_name"),
        column_type: block.get_string("type"),
    }
}

fn contact_sort(block: Block<'_>) -> ContactSort {
    ContactSort {
        field_name: block.get_string("field_name"),
        direction: block.get_string("direction"),
        numeric: block.get_bool("numeric"),
    }
}

/// Copy the server's view of the campaign into `data`.
pub fn flatten_campaign(data: &mut ResourceData, campaign: &Campaign) {
    data.set_nillable("name", campaign.name.clone());
    data.set_nillable("contact_list_id", reference_id(campaign.contact_list.as_ref()));
    data.set_nillable("queue_id", reference_id(campaign.queue.as_ref()));
    data.set_nillable("dialing_mode", campaign.dialing_mode.clone());
    data.set_nillable("script_id", reference_id(campaign.script.as_ref()));
    data.set_nillable("edge_group_id", reference_id(campaign.edge_group.as_ref()));
    data.set_nillable("site_id", reference_id(campaign.site.as_ref()));
    data.set_nillable("campaign_status", campaign.campaign_status.as_ref().map(ToString::to_string));
    if let Some(columns) = &campaign.phone_columns {
        let columns: Vec<Value> = columns
            .iter()
            .map(|c| json!({ "column_name": c.column_name, "type": c.column_type }))
            .collect();
        data.set("phone_columns", columns);
    }
    data.set_nillable("abandon_rate", campaign.abandon_rate);
    if let Some(lists) = &campaign.dnc_lists {
        data.set("dnc_list_ids", reference_ids(lists));
    }
    data.set_nillable("callable_time_set_id", reference_id(campaign.callable_time_set.as_ref()));
    data.set_nillable(
        "call_analysis_response_set_id",
        reference_id(campaign.call_analysis_response_set.as_ref()),
    );
    data.set_nillable("caller_name", campaign.caller_name.clone());
    data.set_nillable("caller_address", campaign.caller_address.clone());
    data.set_nillable("outbound_line_count", campaign.outbound_line_count);
    if let Some(rule_sets) = &campaign.rule_sets {
        data.set("rule_set_ids", reference_ids(rule_sets));
    }
    data.set_nillable("skip_preview_disabled", campaign.skip_preview_disabled);
    data.set_nillable("preview_time_out_seconds", campaign.preview_time_out_seconds);
    data.set_nillable("always_running", campaign.always_running);
    if let Some(sorts) = &campaign.contact_sorts {
        let sorts: Vec<Value> = sorts
            .iter()
            .map(|s| json!({ "field_name": s.field_name, "direction": s.direction, "numeric": s.numeric }))
            .collect();
        data.set("contact_sorts", sorts);
    }
    data.set_nillable("no_answer_timeout", campaign.no_answer_timeout);
    data.set_nillable("call_analysis_language", campaign.call_analysis_language.clone());
    data.set_nillable("priority", campaign.priority);
    if let Some(filters) = &campaign.contact_list_filters {
        data.set("contact_list_filter_ids", reference_ids(filters));
    }
    data.set_nillable("division_id", reference_id(campaign.division.as_ref()));
    if let Some(settings) = &campaign.dynamic_contact_queueing_settings {
        data.set("dynamic_contact_queueing_settings", json!([{ "sort": settings.sort }]));
    }
}
