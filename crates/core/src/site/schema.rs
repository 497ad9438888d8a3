//! Mapping between `telephony_providers_edges_site` attributes and wire
//! entities

use std::str::FromStr;

use dialplane_domain::{
    Block, DigitLength, NumberPlan, NumberRange, OutboundRoute, ResourceData, Result,
    RouteDistribution, Site,
};
use serde_json::{json, Value};

use crate::fields::{non_empty, reference, reference_id, reference_ids, references, string_list};

pub fn build_site(data: &ResourceData) -> Site {
    let root = data.view();
    Site {
        name: root.get_string("name"),
        description: root.get_string("description"),
        location: reference(root, "location_id"),
        media_model: root.get_string("media_model"),
        media_regions: non_empty(root.get_string_list("media_regions")),
        media_regions_use_latency_based: root.get_bool("media_regions_use_latency_based"),
        caller_id: root.get_string("caller_id"),
        caller_name: root.get_string("caller_name"),
        primary_sites: non_empty(references(root, "primary_sites")),
        secondary_sites: non_empty(references(root, "secondary_sites")),
        ..Site::default()
    }
}

/// Desired outbound routes in declaration order.
pub fn build_routes(data: &ResourceData) -> Result<Vec<OutboundRoute>> {
    data.get_blocks("outbound_routes").into_iter().map(build_route).collect()
}

fn build_route(block: Block<'_>) -> Result<OutboundRoute> {
    let distribution = block
        .get_str("distribution")
        .map(|d| RouteDistribution::from_str(d).map(|d| d.as_str().to_string()))
        .transpose()?;

    Ok(OutboundRoute {
        name: block.get_string("name"),
        description: block.get_string("description"),
        classification_types: Some(block.get_string_list("classification_types")),
        enabled: block.get_bool("enabled"),
        distribution,
        external_trunk_bases: Some(references(block, "external_trunk_base_ids")),
        ..OutboundRoute::default()
    })
}

/// Desired number plans in declaration order.
pub fn build_number_plans(data: &ResourceData) -> Vec<NumberPlan> {
    data.get_blocks("number_plans").into_iter().map(build_number_plan).collect()
}

fn build_number_plan(block: Block<'_>) -> NumberPlan {
    let numbers: Vec<NumberRange> = block
        .get_blocks("numbers")
        .into_iter()
        .map(|range| NumberRange { start: range.get_string("start"), end: range.get_string("end") })
        .collect();

    NumberPlan {
        name: block.get_string("name"),
        classification: block.get_string("classification"),
        match_type: block.get_string("match_type"),
        match_format: block.get_string("match_format"),
        normalized_format: block.get_string("normalized_format"),
        numbers: non_empty(numbers),
        digit_length: block
            .get_block("digit_length")
            .map(|len| DigitLength { start: len.get_string("start"), end: len.get_string("end") }),
        ..NumberPlan::default()
    }
}

pub fn flatten_site(data: &mut ResourceData, site: &Site) {
    data.set_nillable("name", site.name.clone());
    data.set_nillable("description", site.description.clone());
    data.set_nillable("location_id", reference_id(site.location.as_ref()));
    data.set_nillable("media_model", site.media_model.clone());
    data.set_nillable("media_regions_use_latency_based", site.media_regions_use_latency_based);
    if let Some(regions) = &site.media_regions {
        data.set("media_regions", string_list(regions));
    }
    data.set_nillable("caller_id", site.caller_id.clone());
    data.set_nillable("caller_name", site.caller_name.clone());
    data.set("primary_sites", reference_ids(site.primary_sites.as_deref().unwrap_or_default()));
    data.set("secondary_sites", reference_ids(site.secondary_sites.as_deref().unwrap_or_default()));
    data.set_nillable("managed", site.managed);
}

pub fn flatten_routes(data: &mut ResourceData, routes: &[OutboundRoute]) {
    let routes: Vec<Value> = routes
        .iter()
        .map(|route| {
            json!({
                "name": route.name,
                "description": route.description,
                "classification_types": route.classification_types.clone().unwrap_or_default(),
                "enabled": route.enabled,
                "distribution": route.distribution,
                "external_trunk_base_ids":
                    reference_ids(route.external_trunk_bases.as_deref().unwrap_or_default()),
            })
        })
        .collect();
    data.set("outbound_routes", routes);
}

pub fn flatten_number_plans(data: &mut ResourceData, plans: &[NumberPlan]) {
    let plans: Vec<Value> = plans
        .iter()
        .map(|plan| {
            let numbers: Vec<Value> = plan
                .numbers
                .iter()
                .flatten()
                .map(|range| json!({ "start": range.start, "end": range.end }))
                .collect();
            let digit_length: Vec<Value> = plan
                .digit_length
                .iter()
                .map(|len| json!({ "start": len.start, "end": len.end }))
                .collect();
            json!({
                "name": plan.name,
                "classification": plan.classification,
                "match_type": plan.match_type,
                "match_format": plan.match_format,
                "normalized_format": plan.normalized_format,
                "numbers": numbers,
                "digit_length": digit_length,
            })
        })
        .collect();
    data.set("number_plans", plans);
}
