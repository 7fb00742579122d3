//! Custodian Janitor
//!
//! Background maintenance engine: a periodic sweep loop that discovers
//! expired resource identifiers and fans each one out to a group of
//! independent cleanup actions.
//!
//! # Overview
//!
//! The janitor is responsible for:
//! - **Discovery**: asking an [`ExpiredIdSource`](custodian_domain::ExpiredIdSource)
//!   for identifiers past the expiration horizon, under a bounded timeout
//! - **Fan-out cleanup**: running every registered
//!   [`Cleaner`](custodian_domain::Cleaner) for each identifier, tolerating
//!   partial failure
//! - **Scheduling**: an immediate first sweep, then one per interval, until
//!   cancelled
//! - **Metrics collection**: counting cleanups and failures for monitoring
//!
//! Failure policy in one line: an identifier is "cleaned enough" when at
//! least one action succeeded; a failed identifier never stops the sweep; a
//! failed sweep never stops the loop. Failures swallowed that way are
//! counted in [`SweepMetrics::partial_failures`], so a single backend that
//! fails on every sweep stays visible.
//!
//! # Usage
//!
//! ```no_run
//! use custodian_janitor::{CleanerGroup, JanitorConfig, JanitorWorker};
//! use custodian_domain::{Cleaner, ExpiredIdSource};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! struct TempFiles;
//! impl Cleaner for TempFiles {
//!     fn clean(&self, id: &str) -> anyhow::Result<()> {
//!         std::fs::remove_file(format!("/tmp/{id}.tmp"))?;
//!         Ok(())
//!     }
//! }
//!
//! struct TempDir;
//! impl ExpiredIdSource for TempDir {
//!     fn expired_ids(&self, _horizon: Duration) -> anyhow::Result<Vec<String>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut group = CleanerGroup::new();
//!     group.add(Box::new(TempFiles));
//!
//!     let worker = JanitorWorker::new(
//!         JanitorConfig::default(),
//!         group,
//!         Arc::new(TempDir),
//!     );
//!     let cancel = CancellationToken::new();
//!     let done = worker.start(cancel.clone())?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     cancel.cancel();
//!     done.await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The janitor can be configured via TOML:
//!
//! ```toml
//! run_every_minutes = 60
//! expire_after_hours = 24
//! ```
//!
//! Both values have hard lower bounds checked before the loop starts; see
//! [`JanitorConfig::validate`].

#![warn(missing_docs)]

mod error;
mod config;
mod group;
mod metrics;
mod janitor;
mod worker;

pub use error::JanitorError;
pub use config::{JanitorConfig, DISCOVERY_TIMEOUT, MIN_EXPIRE_AFTER, MIN_RUN_EVERY};
pub use group::CleanerGroup;
pub use metrics::SweepMetrics;
pub use janitor::Janitor;
pub use worker::JanitorWorker;
