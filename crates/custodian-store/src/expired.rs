//! Expired identifier discovery over a records table

use crate::{ConnProvider, StoreError};
use custodian_domain::{expiry_cutoff, ExpiredIdSource};
use rusqlite::params;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

/// Rows pulled from the table per discovery batch.
const PAGE_SIZE: i64 = 10;

/// Finds identifiers whose rows are older than the horizon.
///
/// Rows are read oldest-first in fixed batches; the scan stops at the first
/// row inside the horizon, since every later row is newer still. Reads only,
/// and the same identifier is reported once no matter how many rows it owns.
///
/// Expects a table with `id TEXT` and `created_at INTEGER` (seconds since
/// the Unix epoch), owned and written by the service that creates the
/// resources.
pub struct ExpiredRecordSource {
    provider: Arc<ConnProvider>,
    table: String,
}

impl ExpiredRecordSource {
    /// Create a source over `table`.
    pub fn new(provider: Arc<ConnProvider>, table: &str) -> Result<Self, StoreError> {
        if table.is_empty() {
            return Err(StoreError::Config("no table".into()));
        }
        Ok(Self {
            provider,
            table: table.to_string(),
        })
    }

    fn page(&self, offset: i64) -> Result<Vec<(String, i64)>, StoreError> {
        self.provider.with_retry(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, created_at FROM {}
                 ORDER BY created_at ASC, id ASC LIMIT ?1 OFFSET ?2",
                self.table
            ))?;
            let rows = stmt.query_map(params![PAGE_SIZE, offset], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?;
            rows.collect()
        })
    }
}

impl ExpiredIdSource for ExpiredRecordSource {
    fn expired_ids(&self, horizon: Duration) -> anyhow::Result<Vec<String>> {
        let cutoff = expiry_cutoff(horizon);
        let cutoff_secs = cutoff
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        tracing::info!("Getting old records, time < {:?}", cutoff);

        let mut seen = HashSet::new();
        let mut res = Vec::new();
        let mut offset = 0;
        loop {
            let rows = self.page(offset)?;
            tracing::debug!("Loaded {} records", rows.len());
            let fetched = rows.len();
            for (id, created_at) in rows {
                if created_at >= cutoff_secs {
                    // sorted ascending: everything after this row is newer
                    return Ok(res);
                }
                if seen.insert(id.clone()) {
                    res.push(id);
                }
            }
            if fetched < PAGE_SIZE as usize {
                return Ok(res);
            }
            offset += PAGE_SIZE;
        }
    }
}
