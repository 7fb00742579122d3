//! Custodian Storage Layer
//!
//! SQLite-backed implementations of the cleanup and discovery traits, plus
//! the lock table that guards at-most-once actions across service instances
//! sharing one database file.
//!
//! # Architecture
//!
//! - [`ConnProvider`]: one lazily opened connection per component, cached
//!   behind a mutex, reopened once after a failure
//! - [`Locker`]: the `(id, lock_key, status)` table and its one-way
//!   `unset -> locked -> terminal` transitions
//! - [`RecordCleaner`]: deletes a table's rows for an identifier
//! - [`ExpiredRecordSource`]: paged oldest-first scan for expired rows
//!
//! # Examples
//!
//! ```no_run
//! use custodian_store::{ConnProvider, Locker};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(ConnProvider::new("custodian.db"));
//! let locker = Locker::new(provider, "email_locks")?;
//! if locker.lock("8a1f", "email-sent")? {
//!     // this process owns the guarded action; mark it finished
//!     locker.unlock("8a1f", "email-sent", 2)?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod conn;
mod expired;
mod lock;
mod record;

pub use conn::ConnProvider;
pub use expired::ExpiredRecordSource;
pub use lock::{Locker, STATUS_LOCKED, STATUS_UNSET};
pub use record::RecordCleaner;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
