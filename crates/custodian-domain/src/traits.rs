//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the sweep engine and the
//! backends it drives. Infrastructure implementations live in other crates.

use std::time::Duration;

/// One idempotent cleanup action for a single resource.
///
/// Implementations remove whatever their backend holds for an identifier:
/// files on disk, database rows, cache entries. Several service instances
/// may sweep the same backends concurrently, so removing an already-removed
/// resource must count as success, not as an error.
pub trait Cleaner: Send + Sync {
    /// Remove the resource named by `id` from this backend.
    fn clean(&self, id: &str) -> anyhow::Result<()>;
}

/// Discovery of identifiers whose resources have outlived the horizon.
///
/// Discovery is read-only and must never produce a false positive: every
/// returned identifier's timestamp is strictly before `now - horizon`.
/// Missing an identifier is fine; a later sweep picks it up.
pub trait ExpiredIdSource: Send + Sync {
    /// Return identifiers expired against `horizon`.
    ///
    /// One call returns a complete, de-duplicated set in a stable order,
    /// even when the backend pages through its data internally.
    fn expired_ids(&self, horizon: Duration) -> anyhow::Result<Vec<String>>;
}
