//! Tracing subscriber setup.
//!
//! Logs go to stderr so binaries can keep stdout for their own output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use dialplane_domain::{DialplaneError, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `filter` when set. With `json` every event is a
/// flattened JSON object, otherwise human-readable lines. Calling this again
/// after a subscriber is installed is a no-op.
///
/// # Errors
/// `DialplaneError::Config` when neither `RUST_LOG` nor `filter` parse.
pub fn init_tracing(filter: &str, json: bool) -> Result<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .map_err(|e| DialplaneError::Config(format!("invalid log filter {filter:?}: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter_layer);
    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr).with_target(false)).try_init()
    };

    if installed.is_ok() {
        tracing::debug!(filter, json, "tracing initialized");
    }
    Ok(())
}
