//! Programmable fake for `CampaignApi`

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use dialplane_core::CampaignApi;
use dialplane_domain::{Campaign, CampaignStatus, DialplaneError, EntityListing, Result};

#[derive(Default)]
struct State {
    campaigns: BTreeMap<String, Campaign>,
    /// Gets that still report `stopping` after a campaign is turned off.
    stopping_polls: BTreeMap<String, u32>,
    /// Gets that still return a deleted campaign (`None` = forever).
    lingering: BTreeMap<String, Option<u32>>,
    deleted: BTreeSet<String>,
    /// Gets that answer not-found before a campaign becomes visible
    /// (`None` = never visible).
    hidden: BTreeMap<String, Option<u32>>,
    pages: Option<Vec<Vec<Campaign>>>,
    update_error: Option<DialplaneError>,
    updates: Vec<Campaign>,
    next_id: u32,
}

/// In-memory campaign API with server-like status behaviour.
#[derive(Default)]
pub struct FakeCampaignApi {
    state: Mutex<State>,
    pub gets: AtomicU32,
    pub creates: AtomicU32,
    pub updates: AtomicU32,
    pub deletes: AtomicU32,
    pub list_pages: AtomicU32,
}

impl FakeCampaignApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing campaign.
    pub fn with_campaign(self, campaign: Campaign) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = campaign.id.clone().expect("seeded campaign needs an id");
            state.campaigns.insert(id, campaign);
        }
        self
    }

    /// After the next `on → off` update, report `stopping` for `polls` gets.
    pub fn stopping_for(self, id: &str, polls: u32) -> Self {
        self.state.lock().unwrap().stopping_polls.insert(id.to_string(), polls);
        self
    }

    /// Keep returning the campaign for `polls` gets after deletion; `None`
    /// keeps it forever.
    pub fn lingering_after_delete(self, id: &str, polls: Option<u32>) -> Self {
        self.state.lock().unwrap().lingering.insert(id.to_string(), polls);
        self
    }

    /// Answer not-found for the first `polls` gets of `id`; `None` hides it
    /// for good. Models a freshly created entity that is not yet readable.
    pub fn visible_after(self, id: &str, polls: Option<u32>) -> Self {
        self.state.lock().unwrap().hidden.insert(id.to_string(), polls);
        self
    }

    /// Every update call fails with `error`.
    pub fn failing_updates(self, error: DialplaneError) -> Self {
        self.state.lock().unwrap().update_error = Some(error);
        self
    }

    /// Serve these listing pages verbatim (page N = index N-1).
    pub fn with_pages(self, pages: Vec<Vec<Campaign>>) -> Self {
        self.state.lock().unwrap().pages = Some(pages);
        self
    }

    pub fn update_bodies(&self) -> Vec<Campaign> {
        self.state.lock().unwrap().updates.clone()
    }

    pub fn stored(&self, id: &str) -> Option<Campaign> {
        self.state.lock().unwrap().campaigns.get(id).cloned()
    }

    pub fn count(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }
}

fn not_found(id: &str) -> DialplaneError {
    DialplaneError::NotFound(format!("campaign {id}"))
}

#[async_trait]
impl CampaignApi for FakeCampaignApi {
    async fn list_page(&self, page_size: u32, page_number: u32) -> Result<EntityListing<Campaign>> {
        self.list_pages.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let page = match &state.pages {
            Some(pages) => pages.get(page_number as usize - 1).cloned().unwrap_or_default(),
            None => state
                .campaigns
                .values()
                .skip(((page_number - 1) * page_size) as usize)
                .take(page_size as usize)
                .cloned()
                .collect(),
        };
        Ok(EntityListing::of(page))
    }

    async fn get(&self, id: &str) -> Result<Campaign> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;

        match state.hidden.get_mut(id) {
            Some(None) => return Err(not_found(id)),
            Some(Some(remaining)) if *remaining > 0 => {
                *remaining -= 1;
                return Err(not_found(id));
            }
            _ => {}
        }

        if let Some(remaining) = state.lingering.get_mut(id) {
            if state.deleted.contains(id) {
                match remaining {
                    Some(0) => {
                        state.campaigns.remove(id);
                        state.deleted.remove(id);
                    }
                    Some(n) => *n -= 1,
                    None => {}
                }
            }
        }

        if let Some(campaign) = state.campaigns.get(id).cloned() {
            if let Some(remaining) = state.stopping_polls.get_mut(id) {
                if campaign.campaign_status == Some(CampaignStatus::Stopping) {
                    if *remaining == 0 {
                        let stored = state.campaigns.get_mut(id).unwrap();
                        stored.campaign_status = Some(CampaignStatus::Off);
                        return Ok(stored.clone());
                    }
                    *remaining -= 1;
                }
            }
            return Ok(campaign);
        }

        Err(not_found(id))
    }

    async fn create(&self, campaign: &Campaign) -> Result<Campaign> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = campaign.clone();
        created.id = Some(format!("campaign-{}", state.next_id));
        created.version = Some(1);
        state.campaigns.insert(created.id.clone().unwrap(), created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, campaign: &Campaign) -> Result<Campaign> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.updates.push(campaign.clone());
        if let Some(error) = state.update_error.clone() {
            return Err(error);
        }

        let has_stopping_phase = state.stopping_polls.contains_key(id);
        let current = state.campaigns.get(id).cloned().ok_or_else(|| not_found(id))?;
        let mut updated = campaign.clone();
        updated.id = Some(id.to_string());
        updated.version = Some(current.version.unwrap_or(0) + 1);
        // Status is only changed when the body names one.
        updated.campaign_status = match (&campaign.campaign_status, current.campaign_status.clone()) {
            (None, status) => status,
            (Some(CampaignStatus::Off), Some(CampaignStatus::On)) if has_stopping_phase => {
                Some(CampaignStatus::Stopping)
            }
            (Some(status), _) => Some(status.clone()),
        };
        state.campaigns.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if !state.campaigns.contains_key(id) || state.deleted.contains(id) {
            return Err(not_found(id));
        }
        if state.lingering.contains_key(id) {
            state.deleted.insert(id.to_string());
        } else {
            state.campaigns.remove(id);
        }
        Ok(())
    }
}
