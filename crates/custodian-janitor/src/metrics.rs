//! Metrics collection for sweep operations

/// Metrics accumulated across sweep cycles
///
/// Tracks identifiers cleaned and failed, discovery rounds that came back
/// empty-handed because of an error, and total runtime.
#[derive(Debug, Clone, Default)]
pub struct SweepMetrics {
    /// Identifiers whose cleanup group reported success
    pub cleaned: usize,

    /// Identifiers whose cleanup group reported failure
    pub failed: usize,

    /// Identifiers cleaned with at least one action failing underneath
    ///
    /// These failures are swallowed by the group policy; the counter keeps a
    /// persistently failing single backend visible.
    pub partial_failures: usize,

    /// Discovery rounds that errored or timed out
    pub discovery_failures: usize,

    /// Total sweep iterations completed
    pub sweep_count: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl SweepMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully cleaned identifier
    pub fn record_cleaned(&mut self) {
        self.cleaned += 1;
    }

    /// Record an identifier whose cleanup failed
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Record an identifier cleaned with swallowed failures underneath
    pub fn record_partial_failure(&mut self) {
        self.partial_failures += 1;
    }

    /// Record a discovery round lost to an error or timeout
    pub fn record_discovery_failure(&mut self) {
        self.discovery_failures += 1;
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        format!(
            "Sweep Metrics Summary\n\
             =====================\n\
             Sweep cycles: {}\n\
             Cleaned: {}\n\
             Failed: {}\n\
             Partial failures: {}\n\
             Discovery failures: {}\n\
             Total runtime: {}s",
            self.sweep_count,
            self.cleaned,
            self.failed,
            self.partial_failures,
            self.discovery_failures,
            self.total_runtime_secs
        )
    }
}
