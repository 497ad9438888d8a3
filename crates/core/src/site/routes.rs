//! Reconciliation of site-owned outbound routes and number plans

use std::collections::{HashMap, VecDeque};

use dialplane_domain::constants::LIST_PAGE_SIZE;
use dialplane_domain::{DialplaneError, Location, MediaRegions, NumberPlan, OutboundRoute, Result};
use tracing::{debug, info};

use super::ports::SiteApi;
use crate::paging::collect_live;

/// Live (not soft-deleted) outbound routes of a site.
pub async fn list_routes(api: &dyn SiteApi, site_id: &str) -> Result<Vec<OutboundRoute>> {
    collect_live(LIST_PAGE_SIZE, |size, number| api.list_outbound_routes_page(site_id, size, number))
        .await
}

/// Make the site's routes match `desired`, keyed by route name.
///
/// Matching routes are updated in place and new ones created. Routes no
/// longer declared are deleted, as are extra server routes that share a
/// name beyond the declared count.
///
/// # Errors
/// The first failing route call; earlier calls are not rolled back.
pub async fn reconcile_routes(
    api: &dyn SiteApi,
    site_id: &str,
    desired: &[OutboundRoute],
) -> Result<()> {
    let mut current: HashMap<String, VecDeque<OutboundRoute>> = HashMap::new();
    for route in list_routes(api, site_id).await? {
        if let Some(name) = route.name.clone() {
            current.entry(name).or_default().push_back(route);
        }
    }

    for route in desired {
        let name = route.name.as_deref().unwrap_or_default();
        let existing = current.get_mut(name).and_then(VecDeque::pop_front);
        match existing.and_then(|existing| existing.id) {
            Some(route_id) => {
                debug!(site_id, route_id = %route_id, name, "updating outbound route");
                api.update_outbound_route(site_id, &route_id, route).await?;
            }
            None => {
                debug!(site_id, name, "creating outbound route");
                api.create_outbound_route(site_id, route).await?;
            }
        }
    }

    for (name, stale) in current {
        for route_id in stale.into_iter().filter_map(|route| route.id) {
            info!(site_id, route_id = %route_id, name = %name, "deleting undeclared outbound route");
            match api.delete_outbound_route(site_id, &route_id).await {
                Err(err) if !err.is_not_found() => return Err(err),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Replace the site's number plans with `desired`, carrying over the server
/// ids of plans whose names already exist.
///
/// # Errors
/// The fetch or replace call's error.
pub async fn replace_number_plans(
    api: &dyn SiteApi,
    site_id: &str,
    desired: &[NumberPlan],
) -> Result<Vec<NumberPlan>> {
    let existing: HashMap<String, String> = api
        .get_number_plans(site_id)
        .await?
        .into_iter()
        .filter_map(|plan| Some((plan.name?, plan.id?)))
        .collect();

    let plans: Vec<NumberPlan> = desired
        .iter()
        .cloned()
        .map(|mut plan| {
            plan.id = plan.name.as_ref().and_then(|name| existing.get(name).cloned());
            plan
        })
        .collect();

    debug!(site_id, count = plans.len(), "replacing number plans");
    api.put_number_plans(site_id, &plans).await
}

/// Fetch a location a site may be bound to.
///
/// # Errors
/// `DataIntegrity` when the location has no emergency number, otherwise the
/// fetch error.
pub async fn fetch_site_location(api: &dyn SiteApi, location_id: &str) -> Result<Location> {
    let location = api.get_location(location_id).await?;
    if location.emergency_number.is_none() {
        return Err(DialplaneError::DataIntegrity(format!(
            "location with id {location_id} does not have an emergency number"
        )));
    }
    Ok(location)
}

/// Every requested region must be one of the organization's media regions.
///
/// # Errors
/// `InvalidInput` naming the first unknown region.
pub fn check_media_regions(available: &MediaRegions, requested: &[String]) -> Result<()> {
    match requested.iter().find(|region| !available.contains(region)) {
        Some(unknown) => Err(DialplaneError::InvalidInput(format!(
            "media region {unknown} is not available; valid regions: {}",
            available.all().join(", ")
        ))),
        None => Ok(()),
    }
}
