//! At-most-once guard over a shared lock table

use crate::{ConnProvider, StoreError};
use rusqlite::params;
use std::sync::Arc;

/// Baseline status of a lock row before anyone acquired it.
pub const STATUS_UNSET: i64 = 0;
/// Status of a lock row whose guarded action was claimed.
pub const STATUS_LOCKED: i64 = 1;

/// Guards an action so it executes at most once per identifier across
/// processes sharing the same database file.
///
/// Each `(id, lock_key)` pair owns one row whose status only ever moves
/// forward: unset, then locked, then a caller-chosen terminal value. The
/// lock key separates independent guarded actions on the same identifier,
/// e.g. `"email-sent"` next to `"webhook-sent"`.
///
/// Both transitions are single SQL statements, so the database decides
/// races; there is no read-modify-write a second process could slip into.
/// Rows are never deleted here; their lifecycle belongs to the resource's
/// own cleanup.
pub struct Locker {
    provider: Arc<ConnProvider>,
    table: String,
}

impl Locker {
    /// Create a locker over `table`, creating the table if missing.
    pub fn new(provider: Arc<ConnProvider>, table: &str) -> Result<Self, StoreError> {
        if table.is_empty() {
            return Err(StoreError::Config("no lock table name".into()));
        }
        let locker = Self {
            provider,
            table: table.to_string(),
        };
        locker.init_schema()?;
        Ok(locker)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.provider.with_retry(|conn| {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id TEXT NOT NULL,
                    lock_key TEXT NOT NULL,
                    status INTEGER NOT NULL DEFAULT 0,
                    PRIMARY KEY (id, lock_key)
                )",
                self.table
            ))
        })
    }

    /// Try to take the lock for `(id, key)`.
    ///
    /// Returns `Ok(true)` when this caller flipped the row from unset to
    /// locked. `Ok(false)` means another caller already locked or
    /// terminalized the pair; the guarded action must be skipped. That is
    /// the expected outcome under contention, not a failure.
    pub fn lock(&self, id: &str, key: &str) -> Result<bool, StoreError> {
        tracing::info!("Locking {}: {}", id, key);

        // make sure the row exists; racing inserters converge on one row
        self.provider.with_retry(|conn| {
            conn.execute(
                &format!(
                    "INSERT OR IGNORE INTO {} (id, lock_key, status) VALUES (?1, ?2, ?3)",
                    self.table
                ),
                params![id, key, STATUS_UNSET],
            )
        })?;

        let updated = self.provider.with_retry(|conn| {
            conn.execute(
                &format!(
                    "UPDATE {} SET status = ?3 WHERE id = ?1 AND lock_key = ?2 AND status = ?4",
                    self.table
                ),
                params![id, key, STATUS_LOCKED, STATUS_UNSET],
            )
        })?;
        Ok(updated == 1)
    }

    /// Move a locked `(id, key)` to the terminal `value`.
    ///
    /// A pair that is not currently locked is left untouched and reported as
    /// success; unlock usually runs in a deferred cleanup path regardless of
    /// whether the guarded action was ever claimed.
    pub fn unlock(&self, id: &str, key: &str, value: i64) -> Result<(), StoreError> {
        tracing::info!("Unlocking {}: {}", id, key);

        let updated = self.provider.with_retry(|conn| {
            conn.execute(
                &format!(
                    "UPDATE {} SET status = ?3 WHERE id = ?1 AND lock_key = ?2 AND status = ?4",
                    self.table
                ),
                params![id, key, value, STATUS_LOCKED],
            )
        })?;
        if updated == 0 {
            tracing::debug!("No locked row for {}: {}", id, key);
        }
        Ok(())
    }
}
