//! Core sweep implementation

use crate::config::DISCOVERY_TIMEOUT;
use crate::{CleanerGroup, JanitorConfig, SweepMetrics};
use custodian_domain::ExpiredIdSource;
use std::sync::Arc;
use std::time::SystemTime;

/// One sweep engine: discovers expired identifiers and hands each one to
/// the cleanup actions.
///
/// A sweep never propagates failure. A discovery error or timeout means
/// zero identifiers this round and the next sweep retries from scratch; a
/// per-identifier cleanup failure is logged and the loop moves on to the
/// next identifier. Identifiers are processed one at a time, in source
/// order, which bounds backend load and keeps the log readable.
pub struct Janitor {
    config: JanitorConfig,
    group: CleanerGroup,
    source: Arc<dyn ExpiredIdSource>,
    metrics: SweepMetrics,
}

impl Janitor {
    /// Create a janitor from its configuration and collaborators.
    pub fn new(
        config: JanitorConfig,
        group: CleanerGroup,
        source: Arc<dyn ExpiredIdSource>,
    ) -> Self {
        Self {
            config,
            group,
            source,
            metrics: SweepMetrics::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the accumulated metrics
    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Perform a single sweep: one discovery query, then one cleanup pass
    /// per identifier. Returns the updated metrics.
    pub async fn sweep(&mut self) -> SweepMetrics {
        let start = SystemTime::now();
        tracing::info!("Running cleaning");

        let ids = self.discover().await;
        tracing::info!("Got {} IDs to clean", ids.len());

        for id in &ids {
            match self.group.clean_counted(id) {
                Ok(0) => self.metrics.record_cleaned(),
                Ok(_) => {
                    // cleaned enough, but the group swallowed failures
                    self.metrics.record_cleaned();
                    self.metrics.record_partial_failure();
                }
                Err(err) => {
                    tracing::error!("Cleaning {} failed: {}", id, err);
                    self.metrics.record_failed();
                }
            }
        }

        self.metrics.record_sweep();
        if let Ok(elapsed) = start.elapsed() {
            self.metrics.total_runtime_secs += elapsed.as_secs();
        }
        self.metrics.clone()
    }

    /// Query the source under the discovery timeout.
    ///
    /// The query runs on the blocking pool so a slow backend stalls neither
    /// the ticker nor cancellation; past the timeout the round is abandoned
    /// and the stragglers finish on their own.
    async fn discover(&mut self) -> Vec<String> {
        let source = Arc::clone(&self.source);
        let horizon = self.config.expire_after();
        let query = tokio::task::spawn_blocking(move || source.expired_ids(horizon));

        match tokio::time::timeout(DISCOVERY_TIMEOUT, query).await {
            Ok(Ok(Ok(ids))) => ids,
            Ok(Ok(Err(err))) => {
                tracing::error!("Getting expired IDs failed: {}", err);
                self.metrics.record_discovery_failure();
                Vec::new()
            }
            Ok(Err(err)) => {
                tracing::error!("Discovery task failed: {}", err);
                self.metrics.record_discovery_failure();
                Vec::new()
            }
            Err(_) => {
                tracing::error!("Discovery timed out after {:?}", DISCOVERY_TIMEOUT);
                self.metrics.record_discovery_failure();
                Vec::new()
            }
        }
    }
}
