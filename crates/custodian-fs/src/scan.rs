//! Stale-entry discovery over a storage directory

use crate::FsError;
use anyhow::Context;
use custodian_domain::{expiry_cutoff, ExpiredIdSource};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Reports directory entries whose modification time is past the horizon.
///
/// Entry names are the identifiers, so this pairs with cleaners whose
/// patterns resolve to the same directory layout.
pub struct OldDirScanner {
    dir: PathBuf,
}

impl OldDirScanner {
    /// Create a scanner over `dir`.
    pub fn new(dir: &str) -> Result<Self, FsError> {
        if dir.is_empty() {
            return Err(FsError::Config("no dir".into()));
        }
        Ok(Self {
            dir: PathBuf::from(dir),
        })
    }
}

impl ExpiredIdSource for OldDirScanner {
    fn expired_ids(&self, horizon: Duration) -> anyhow::Result<Vec<String>> {
        let cutoff = expiry_cutoff(horizon);
        tracing::info!("Getting old files, time < {:?}", cutoff);

        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("can't read dir {}", self.dir.display()))?;
        let mut res = Vec::new();
        for entry in entries {
            let entry = entry?;
            let modified = entry.metadata()?.modified()?;
            if modified < cutoff {
                res.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        // read_dir order is platform-dependent; keep the result stable
        res.sort();
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_scanner_requires_dir() {
        assert!(OldDirScanner::new("").is_err());
        assert!(OldDirScanner::new("/tmp").is_ok());
    }

    #[test]
    fn test_expired_ids_filters_by_age() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("old1"), b"x").unwrap();
        fs::write(dir.path().join("old2"), b"x").unwrap();
        thread::sleep(Duration::from_millis(60));

        let scanner = OldDirScanner::new(&dir.path().to_string_lossy()).unwrap();

        // everything written more than 10ms ago is expired
        let ids = scanner.expired_ids(Duration::from_millis(10)).unwrap();
        assert_eq!(ids, vec!["old1".to_string(), "old2".to_string()]);

        // nothing is an hour old
        let ids = scanner.expired_ids(Duration::from_secs(3600)).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn test_expired_ids_missing_dir_fails() {
        let scanner = OldDirScanner::new("/nonexistent/custodian-test").unwrap();
        assert!(scanner.expired_ids(Duration::from_secs(60)).is_err());
    }

    #[test]
    fn test_expired_ids_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = OldDirScanner::new(&dir.path().to_string_lossy()).unwrap();
        let ids = scanner.expired_ids(Duration::from_millis(1)).unwrap();
        assert!(ids.is_empty());
    }
}
