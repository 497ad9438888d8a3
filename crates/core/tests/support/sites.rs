//! Programmable fake for `SiteApi`

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dialplane_core::SiteApi;
use dialplane_domain::{
    DialplaneError, EmergencyNumber, EntityListing, EntityState, Location, MediaRegions,
    NumberPlan, OutboundRoute, Result, Site,
};

#[derive(Default)]
struct State {
    sites: Vec<Site>,
    routes: BTreeMap<String, Vec<OutboundRoute>>,
    plans: BTreeMap<String, Vec<NumberPlan>>,
    locations: BTreeMap<String, Location>,
    regions: MediaRegions,
    plan_puts: Vec<Vec<NumberPlan>>,
    next_id: u32,
}

#[derive(Default)]
pub struct FakeSiteApi {
    state: Mutex<State>,
    pub list_pages: AtomicU32,
    pub route_creates: AtomicU32,
    pub route_updates: AtomicU32,
    pub route_deletes: AtomicU32,
    pub deletes: AtomicU32,
}

pub fn site(id: &str, name: &str, managed: bool, state: Option<EntityState>) -> Site {
    Site {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        managed: Some(managed),
        state,
        version: Some(1),
        ..Site::default()
    }
}

pub fn route(id: &str, name: &str) -> OutboundRoute {
    OutboundRoute {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        state: Some(EntityState::Active),
        ..OutboundRoute::default()
    }
}

impl FakeSiteApi {
    pub fn new() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.regions = MediaRegions {
                aws_home_region: Some("us-east-1".to_string()),
                aws_core_regions: Some(vec!["us-west-2".to_string()]),
                aws_satellite_regions: None,
            };
        }
        fake
    }

    pub fn with_site(self, site: Site) -> Self {
        self.state.lock().unwrap().sites.push(site);
        self
    }

    pub fn with_routes(self, site_id: &str, routes: Vec<OutboundRoute>) -> Self {
        self.state.lock().unwrap().routes.insert(site_id.to_string(), routes);
        self
    }

    pub fn with_plans(self, site_id: &str, plans: Vec<NumberPlan>) -> Self {
        self.state.lock().unwrap().plans.insert(site_id.to_string(), plans);
        self
    }

    /// Register a location, with or without an emergency number.
    pub fn with_location(self, id: &str, emergency: bool) -> Self {
        let location = Location {
            id: Some(id.to_string()),
            name: Some(format!("Location {id}")),
            emergency_number: emergency.then(|| EmergencyNumber {
                e164: Some("+13175550100".to_string()),
                number: Some("3175550100".to_string()),
                number_type: Some("default".to_string()),
            }),
        };
        self.state.lock().unwrap().locations.insert(id.to_string(), location);
        self
    }

    pub fn routes_of(&self, site_id: &str) -> Vec<OutboundRoute> {
        self.state.lock().unwrap().routes.get(site_id).cloned().unwrap_or_default()
    }

    pub fn plan_puts(&self) -> Vec<Vec<NumberPlan>> {
        self.state.lock().unwrap().plan_puts.clone()
    }

    pub fn count(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }
}

fn not_found(what: &str) -> DialplaneError {
    DialplaneError::NotFound(what.to_string())
}

fn page<T: Clone>(items: impl Iterator<Item = T>, page_size: u32, page_number: u32) -> EntityListing<T> {
    EntityListing::of(
        items
            .skip(((page_number - 1) * page_size) as usize)
            .take(page_size as usize)
            .collect(),
    )
}

#[async_trait]
impl SiteApi for FakeSiteApi {
    async fn list_page(
        &self,
        page_size: u32,
        page_number: u32,
        managed: bool,
        name: Option<&str>,
    ) -> Result<EntityListing<Site>> {
        self.list_pages.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let matching = state.sites.iter().cloned().filter(|site| {
            site.managed.unwrap_or(false) == managed
                && name.map_or(true, |wanted| site.name.as_deref().is_some_and(|n| n.contains(wanted)))
        });
        Ok(page(matching, page_size, page_number))
    }

    async fn get(&self, id: &str) -> Result<Site> {
        let state = self.state.lock().unwrap();
        state
            .sites
            .iter()
            .find(|site| site.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found(&format!("site {id}")))
    }

    async fn create(&self, site: &Site) -> Result<Site> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = site.clone();
        created.id = Some(format!("site-{}", state.next_id));
        created.version = Some(1);
        created.state = Some(EntityState::Active);
        created.managed = Some(false);
        state.sites.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, site: &Site) -> Result<Site> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .sites
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or_else(|| not_found(&format!("site {id}")))?;
        let version = stored.version.unwrap_or(0) + 1;
        *stored = Site {
            id: Some(id.to_string()),
            version: Some(version),
            state: stored.state.clone(),
            managed: stored.managed,
            ..site.clone()
        };
        Ok(stored.clone())
    }

    /// Sites are soft-deleted: they stay readable with state `deleted`.
    async fn delete(&self, id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let stored = state
            .sites
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or_else(|| not_found(&format!("site {id}")))?;
        stored.state = Some(EntityState::Deleted);
        Ok(())
    }

    async fn list_outbound_routes_page(
        &self,
        site_id: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<EntityListing<OutboundRoute>> {
        let state = self.state.lock().unwrap();
        let routes = state.routes.get(site_id).cloned().unwrap_or_default();
        Ok(page(routes.into_iter(), page_size, page_number))
    }

    async fn create_outbound_route(&self, site_id: &str, route: &OutboundRoute) -> Result<OutboundRoute> {
        self.route_creates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = route.clone();
        created.id = Some(format!("route-{}", state.next_id));
        created.state = Some(EntityState::Active);
        state.routes.entry(site_id.to_string()).or_default().push(created.clone());
        Ok(created)
    }

    async fn update_outbound_route(
        &self,
        site_id: &str,
        route_id: &str,
        route: &OutboundRoute,
    ) -> Result<OutboundRoute> {
        self.route_updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let stored = state
            .routes
            .get_mut(site_id)
            .and_then(|routes| routes.iter_mut().find(|r| r.id.as_deref() == Some(route_id)))
            .ok_or_else(|| not_found(&format!("outbound route {route_id}")))?;
        *stored = OutboundRoute {
            id: Some(route_id.to_string()),
            state: Some(EntityState::Active),
            ..route.clone()
        };
        Ok(stored.clone())
    }

    async fn delete_outbound_route(&self, site_id: &str, route_id: &str) -> Result<()> {
        self.route_deletes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let routes = state.routes.entry(site_id.to_string()).or_default();
        routes.retain(|r| r.id.as_deref() != Some(route_id));
        Ok(())
    }

    async fn get_number_plans(&self, site_id: &str) -> Result<Vec<NumberPlan>> {
        Ok(self.state.lock().unwrap().plans.get(site_id).cloned().unwrap_or_default())
    }

    async fn put_number_plans(&self, site_id: &str, plans: &[NumberPlan]) -> Result<Vec<NumberPlan>> {
        let mut state = self.state.lock().unwrap();
        state.plan_puts.push(plans.to_vec());
        state.plans.insert(site_id.to_string(), plans.to_vec());
        Ok(plans.to_vec())
    }

    async fn get_location(&self, location_id: &str) -> Result<Location> {
        let state = self.state.lock().unwrap();
        state
            .locations
            .get(location_id)
            .cloned()
            .ok_or_else(|| not_found(&format!("location {location_id}")))
    }

    async fn get_media_regions(&self) -> Result<MediaRegions> {
        Ok(self.state.lock().unwrap().regions.clone())
    }
}
