//! Export every remote outbound campaign, contact list and site as JSON.
//!
//! Usage: `dialplane-export [RESOURCE_TYPE...]`
//!
//! With no arguments every registered resource type is exported. The JSON
//! document goes to stdout, logs to stderr. Set `DIALPLANE_LOG_FORMAT=json`
//! for structured logs.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use dialplane_core::{OperationContext, ResourceRegistry};
use dialplane_domain::ResourceIdMetaMap;
use dialplane_infra::{build_proxies, config, observability, PlatformClient};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Resource type → exported entities.
type ExportDocument = BTreeMap<&'static str, ResourceIdMetaMap>;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = format!("{e:#}"), "export failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let json_logs = std::env::var("DIALPLANE_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    observability::init_tracing("info", json_logs)?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => warn!(error = %e, "no .env file loaded"),
    }

    let config = config::load().context("loading configuration")?;
    let client = PlatformClient::from_config(&config.api).context("building API client")?;
    let proxies = build_proxies(Arc::new(client));
    let registry = ResourceRegistry::new(&proxies, &config);

    let requested: Vec<String> = std::env::args().skip(1).collect();
    let types = select_types(&registry, &requested)?;

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling export");
            on_interrupt.cancel();
        }
    });
    let ctx = OperationContext::background().with_cancellation(token);

    let document = export(&registry, &types, &ctx).await?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &document).context("writing export document")?;
    writeln!(stdout)?;
    Ok(())
}

/// Resolve command-line resource types against the registry; none means all.
fn select_types(registry: &ResourceRegistry, requested: &[String]) -> anyhow::Result<Vec<&'static str>> {
    let known = registry.resource_types();
    if requested.is_empty() {
        return Ok(known);
    }

    requested
        .iter()
        .map(|name| {
            known.iter().copied().find(|k| k == name).ok_or_else(|| {
                anyhow!("unknown resource type {name:?}, expected one of: {}", known.join(", "))
            })
        })
        .collect()
}

async fn export(
    registry: &ResourceRegistry,
    types: &[&'static str],
    ctx: &OperationContext,
) -> anyhow::Result<ExportDocument> {
    let mut document = ExportDocument::new();

    for &type_name in types {
        let Some(adapter) = registry.resource(type_name) else {
            bail!("resource type {type_name} is not registered");
        };

        match adapter.export_all(ctx).await {
            Ok(entities) => {
                info!(resource_type = type_name, count = entities.len(), "exported");
                document.insert(type_name, entities);
            }
            Err(diagnostics) => {
                let reason = diagnostics
                    .first_error()
                    .map_or_else(|| "unknown error".to_string(), ToString::to_string);
                bail!("export of {type_name} failed: {reason}");
            }
        }
    }

    Ok(document)
}
