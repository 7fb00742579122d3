//! Custodian Filesystem Layer
//!
//! Filesystem implementations of the cleanup and discovery traits: a
//! pattern-based file cleaner and a directory scanner that reports stale
//! entries.
//!
//! # Examples
//!
//! ```no_run
//! use custodian_fs::{LocalFileCleaner, OldDirScanner};
//! use custodian_domain::{Cleaner, ExpiredIdSource};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cleaner = LocalFileCleaner::new("/data/uploads", "{ID}.wav")?;
//! cleaner.clean("8a1f")?;
//!
//! let scanner = OldDirScanner::new("/data/uploads")?;
//! let stale = scanner.expired_ids(Duration::from_secs(24 * 3600))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cleaner;
mod scan;

pub use cleaner::{file_cleaners, LocalFileCleaner};
pub use scan::OldDirScanner;

use thiserror::Error;

/// Errors that can occur in the filesystem backends
#[derive(Error, Debug)]
pub enum FsError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed glob pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),
}
