//! Metrics collector trait.
//!
//! Implementations gather host and service facts. The engine only consumes the
//! resulting `FactSheet` and never depends on how it was produced.

use async_trait::async_trait;

use crate::error::CollectionError;
use crate::models::FactSheet;

/// Source of fact sheets for a named service.
#[async_trait]
pub trait MetricsCollector: Send + Sync {
    /// Collect facts for `service`. Failures must be handled before any
    /// recommendation is attempted.
    async fn collect(&self, service: &str) -> Result<FactSheet, CollectionError>;
}
