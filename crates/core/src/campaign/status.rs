//! Campaign status-transition protocol
//!
//! ```text
//!   off ──enable──▶ on ──disable──▶ stopping ──(server)──▶ off ──▶ deleted
//! ```
//!
//! `stopping` is driven by the server and is never requested. A not-found
//! answer means "not visible yet" while reading but "deletion confirmed"
//! after a delete call; the two pollers below interpret it accordingly.

use dialplane_common::resilience::Retryable;
use dialplane_domain::constants::CAMPAIGN_LABEL;
use dialplane_domain::{Campaign, CampaignStatus, DialplaneError, Result, TimeoutConfig};
use tracing::{debug, info, instrument};

use super::ports::CampaignApi;
use crate::polling::{classify, poll, retry_while};

/// Move `current` to `desired` with a single update call, or do nothing
/// when it is already there.
///
/// Returns the updated entity when a write was issued. The `on` transition
/// is not polled for stabilisation.
///
/// # Errors
/// The update call's error, unchanged.
#[instrument(skip(api, current), fields(campaign_id = current.id.as_deref().unwrap_or_default()))]
pub async fn apply_status_change(
    api: &dyn CampaignApi,
    current: &Campaign,
    desired: &CampaignStatus,
) -> Result<Option<Campaign>> {
    let status = current.status();
    if &status == desired {
        debug!(%status, "campaign already in desired status");
        return Ok(None);
    }

    let id = current
        .id
        .as_deref()
        .ok_or_else(|| DialplaneError::Internal("campaign snapshot has no id".to_string()))?;

    let mut body = current.clone();
    body.campaign_status = Some(desired.clone());
    let updated = api.update(id, &body).await?;
    info!(from = %status, to = %desired, "campaign status changed");
    Ok(Some(updated))
}

/// Fetch a campaign once it is visible and not `stopping`.
///
/// Not-found and `stopping` are retried until the read budget is spent;
/// other errors are retried only when transient.
///
/// # Errors
/// `Timeout` naming the last cause on budget exhaustion, or the first
/// terminal error.
pub async fn read_settled(api: &dyn CampaignApi, id: &str, timeouts: &TimeoutConfig) -> Result<Campaign> {
    poll(timeouts.read(), timeouts.poll_interval(), move || async move {
        match api.get(id).await {
            Ok(campaign) if campaign.status() == CampaignStatus::Stopping => Err(Retryable::Transient(
                DialplaneError::Pending(format!("{CAMPAIGN_LABEL} still stopping {id}")),
            )),
            Ok(campaign) => Ok(campaign),
            Err(err) if err.is_not_found() => Err(Retryable::Transient(err)),
            Err(err) => Err(classify(err)),
        }
    })
    .await
}

/// Turn a campaign off ahead of deletion and wait for it to leave
/// `stopping`.
///
/// The unit *read → set off* is repeated while the platform answers bad
/// request (it rejects writes during some transitions). A campaign that is
/// already gone, or disappears while draining, counts as settled; this
/// keeps a repeated delete from failing on the turn-off step.
///
/// # Errors
/// The first non-bad-request failure, or `Timeout` when the budget runs out.
#[instrument(skip(api, timeouts))]
pub async fn turn_off(api: &dyn CampaignApi, id: &str, timeouts: &TimeoutConfig) -> Result<()> {
    let present = retry_while(
        timeouts.status_change(),
        timeouts.poll_interval(),
        DialplaneError::is_bad_request,
        move || async move {
            let current = match api.get(id).await {
                Ok(campaign) => campaign,
                Err(err) if err.is_not_found() => return Ok(false),
                Err(err) => return Err(err),
            };
            match apply_status_change(api, &current, &CampaignStatus::Off).await {
                Ok(_) => Ok(true),
                Err(err) if err.is_not_found() => Ok(false),
                Err(err) => Err(err),
            }
        },
    )
    .await?;

    if !present {
        debug!(campaign_id = id, "campaign already gone, nothing to turn off");
        return Ok(());
    }

    poll(timeouts.status_change(), timeouts.poll_interval(), move || async move {
        match api.get(id).await {
            Ok(campaign) if campaign.status() == CampaignStatus::Stopping => Err(Retryable::Transient(
                DialplaneError::Pending(format!("{CAMPAIGN_LABEL} still stopping {id}")),
            )),
            Ok(_) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(classify(err)),
        }
    })
    .await
}

/// Poll until the campaign is gone after a delete call.
///
/// # Errors
/// `Timeout` with "<label> <id> still exists" when it never disappears, or
/// the first non-not-found error.
pub async fn confirm_deleted(api: &dyn CampaignApi, id: &str, timeouts: &TimeoutConfig) -> Result<()> {
    poll(timeouts.delete(), timeouts.poll_interval(), move || async move {
        match api.get(id).await {
            Err(err) if err.is_not_found() => {
                info!(campaign_id = id, "deleted outbound campaign");
                Ok(())
            }
            Err(err) => Err(Retryable::Fatal(err)),
            Ok(_) => Err(Retryable::Transient(DialplaneError::Pending(format!(
                "{CAMPAIGN_LABEL} {id} still exists"
            )))),
        }
    })
    .await
}
