//! Cached connection handling with forced-reconnect retry

use crate::StoreError;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Lazily opened SQLite connection shared by the storage components.
///
/// The handle is opened on first use and cached behind a mutex, so it is
/// owned by the component instance rather than living in global state. A
/// failed operation discards the cached handle, reopens once and retries;
/// the second failure is the caller's.
pub struct ConnProvider {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl ConnProvider {
    /// Create a provider for the database at `path`.
    ///
    /// Nothing is opened until the first operation runs.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            conn: Mutex::new(None),
        }
    }

    /// Run `f` on the cached connection, reconnecting once on failure.
    pub fn with_retry<T>(
        &self,
        f: impl Fn(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, StoreError> {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let conn = match guard.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        match f(&conn) {
            Ok(value) => {
                *guard = Some(conn);
                Ok(value)
            }
            Err(first) => {
                tracing::info!("Retrying after reopening connection: {}", first);
                drop(conn);
                let conn = self.open()?;
                match f(&conn) {
                    Ok(value) => {
                        *guard = Some(conn);
                        Ok(value)
                    }
                    Err(err) => Err(err.into()),
                }
            }
        }
    }

    /// Drop the cached connection, if any. The next operation reopens it.
    pub fn close(&self) {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    fn open(&self) -> Result<Connection, StoreError> {
        tracing::info!("Opening database {}", self.path.display());
        let conn = Connection::open(&self.path)?;
        // several processes may sweep the same file; don't fail on a writer
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(conn)
    }
}
