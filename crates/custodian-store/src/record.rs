//! Table row cleanup keyed by identifier

use crate::{ConnProvider, StoreError};
use custodian_domain::Cleaner;
use rusqlite::params;
use std::sync::Arc;

/// Deletes every row a table holds for an identifier.
///
/// Deleting zero rows is success; another instance may already have swept
/// the identifier.
pub struct RecordCleaner {
    provider: Arc<ConnProvider>,
    table: String,
}

impl RecordCleaner {
    /// Create a cleaner over `table`.
    pub fn new(provider: Arc<ConnProvider>, table: &str) -> Result<Self, StoreError> {
        if table.is_empty() {
            return Err(StoreError::Config("no table".into()));
        }
        tracing::info!("Init record clean for {}", table);
        Ok(Self {
            provider,
            table: table.to_string(),
        })
    }
}

impl Cleaner for RecordCleaner {
    fn clean(&self, id: &str) -> anyhow::Result<()> {
        tracing::info!("Cleaning record for {} [id={}]", self.table, id);
        let deleted = self.provider.with_retry(|conn| {
            conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1", self.table),
                params![id],
            )
        })?;
        tracing::info!("Deleted {}", deleted);
        Ok(())
    }
}
