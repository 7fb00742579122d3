//! Background worker driving sweeps on a fixed interval

use crate::{CleanerGroup, Janitor, JanitorConfig, JanitorError};
use custodian_domain::ExpiredIdSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Background worker that sweeps on a fixed schedule until cancelled.
///
/// The first sweep runs immediately on start, so a resource already past its
/// horizon is cleaned without waiting a full interval. Cancellation is
/// observed between ticks only; an in-flight sweep always runs to
/// completion, trading a slightly slower shutdown for never stopping
/// halfway through an identifier.
///
/// # Examples
///
/// ```no_run
/// use custodian_janitor::{CleanerGroup, JanitorConfig, JanitorWorker};
/// use custodian_domain::ExpiredIdSource;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// struct Empty;
/// impl ExpiredIdSource for Empty {
///     fn expired_ids(&self, _horizon: Duration) -> anyhow::Result<Vec<String>> {
///         Ok(Vec::new())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let worker = JanitorWorker::new(
///         JanitorConfig::default(),
///         CleanerGroup::new(),
///         Arc::new(Empty),
///     );
///     let cancel = CancellationToken::new();
///     let done = worker.start(cancel.clone())?;
///
///     // ... later, on shutdown:
///     cancel.cancel();
///     done.await?;
///     Ok(())
/// }
/// ```
pub struct JanitorWorker {
    janitor: Janitor,
    run_every: Duration,
}

impl JanitorWorker {
    /// Create a worker from its configuration and collaborators.
    pub fn new(
        config: JanitorConfig,
        group: CleanerGroup,
        source: Arc<dyn ExpiredIdSource>,
    ) -> Self {
        let run_every = config.run_every();
        Self {
            janitor: Janitor::new(config, group, source),
            run_every,
        }
    }

    /// Validate the configuration and start the sweep loop.
    ///
    /// Fails fast on a bad configuration without starting anything. On
    /// success the returned receiver fires exactly once, after cancellation,
    /// when the loop has fully stopped. Must be called within a tokio
    /// runtime.
    pub fn start(
        self,
        cancel: CancellationToken,
    ) -> Result<oneshot::Receiver<()>, JanitorError> {
        self.janitor.config().validate()?;
        tracing::info!("Starting sweep worker every {:?}", self.run_every);
        Ok(spawn_loop(self.janitor, self.run_every, cancel))
    }
}

fn spawn_loop(
    mut janitor: Janitor,
    run_every: Duration,
    cancel: CancellationToken,
) -> oneshot::Receiver<()> {
    let (done_tx, done_rx) = oneshot::channel();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + run_every, run_every);
        // only a minimum interval is guaranteed; late ticks are not repaid
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // run on startup
        janitor.sweep().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    janitor.sweep().await;
                }
                _ = cancel.cancelled() => {
                    tracing::info!("Stopped sweep worker");
                    break;
                }
            }
        }
        tracing::info!("Final metrics:\n{}", janitor.metrics().summary());
        let _ = done_tx.send(());
    });
    done_rx
}
