//! Boundary traits between the configuration engine and per-type adapters

use async_trait::async_trait;
use dialplane_domain::{Diagnostic, Diagnostics, DialplaneError, ResourceData, ResourceIdMetaMap};

use crate::context::OperationContext;

/// CRUD plus bulk export for one declarative resource type.
///
/// Operations never panic or raise; failures come back as error
/// diagnostics. On success the returned diagnostics may still carry
/// warnings.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    /// Declarative type name, e.g. `outbound_campaign`.
    fn type_name(&self) -> &'static str;

    async fn create(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics;

    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics;

    async fn update(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics;

    async fn delete(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics;

    /// Enumerate every remote instance for export. Never mutates remote
    /// state.
    async fn export_all(&self, ctx: &OperationContext)
        -> Result<ResourceIdMetaMap, Diagnostics>;
}

/// Read-only lookup that resolves configuration inputs to an id.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Diagnostics;
}

/// Single error diagnostic with the failure rendered as detail.
pub fn failure(summary: impl Into<String>, error: &DialplaneError) -> Diagnostics {
    Diagnostic::error(summary).with_detail(error.to_string()).into()
}

/// Collapse an internal outcome into the diagnostics the engine sees.
pub fn settle(outcome: Result<Diagnostics, Diagnostics>) -> Diagnostics {
    outcome.unwrap_or_else(|diagnostics| diagnostics)
}

/// Attach an operation summary to a domain error.
pub trait Diagnose<T> {
    /// # Errors
    /// The original error rendered as an error diagnostic under `summary`.
    fn diagnose<S: Into<String>>(self, summary: impl FnOnce() -> S) -> Result<T, Diagnostics>;
}

impl<T> Diagnose<T> for Result<T, DialplaneError> {
    fn diagnose<S: Into<String>>(self, summary: impl FnOnce() -> S) -> Result<T, Diagnostics> {
        self.map_err(|error| failure(summary(), &error))
    }
}

/// The stored id, or an error diagnostic when the resource has none.
pub fn require_id(data: &ResourceData, operation: &str) -> Result<String, Diagnostics> {
    data.id().map(str::to_string).ok_or_else(|| {
        Diagnostic::error(format!("Cannot {operation} a resource without an id")).into()
    })
}
