//! Pattern-based removal of a resource's files

use crate::FsError;
use custodian_domain::Cleaner;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the identifier when resolving a pattern.
const ID_TOKEN: &str = "{ID}";

/// Removes the files a pattern resolves to for an identifier.
///
/// The pattern must contain the literal `{ID}` and may use glob syntax
/// around it, e.g. `{ID}.*` or `results/{ID}/*`. A relative pattern is
/// resolved under the storage path; an absolute pattern stands alone.
/// Matching nothing is success, so an already-removed resource never fails
/// the sweep.
pub struct LocalFileCleaner {
    storage_path: String,
    pattern: String,
}

impl LocalFileCleaner {
    /// Create a cleaner for `pattern` rooted at `storage_path`.
    pub fn new(storage_path: &str, pattern: &str) -> Result<Self, FsError> {
        tracing::info!("Init local file clean at: {}/{}", storage_path, pattern);
        if pattern.is_empty() {
            return Err(FsError::Config("no pattern provided".into()));
        }
        if !pattern.contains(ID_TOKEN) {
            return Err(FsError::Config(format!(
                "pattern does not contain {}",
                ID_TOKEN
            )));
        }
        let root = if Path::new(pattern).is_absolute() {
            String::new()
        } else {
            if storage_path.is_empty() {
                return Err(FsError::Config("no storage path provided".into()));
            }
            storage_path.to_string()
        };
        Ok(Self {
            storage_path: root,
            pattern: pattern.to_string(),
        })
    }

    fn path_for(&self, id: &str) -> PathBuf {
        let resolved = self.pattern.replace(ID_TOKEN, id);
        if self.storage_path.is_empty() {
            PathBuf::from(resolved)
        } else {
            Path::new(&self.storage_path).join(resolved)
        }
    }
}

impl Cleaner for LocalFileCleaner {
    fn clean(&self, id: &str) -> anyhow::Result<()> {
        let target = self.path_for(id);
        tracing::info!("Removing {}", target.display());
        remove_matches(&target)?;
        Ok(())
    }
}

fn remove_matches(pattern: &Path) -> Result<(), FsError> {
    let pattern = pattern.to_string_lossy();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(glob::GlobError::into_error)?;
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        tracing::info!("Removed {}", path.display());
    }
    Ok(())
}

/// Build one cleaner per configured pattern, skipping blank entries.
pub fn file_cleaners(
    storage_path: &str,
    patterns: &[String],
) -> Result<Vec<LocalFileCleaner>, FsError> {
    let mut result = Vec::new();
    for pattern in patterns {
        let pattern = pattern.trim();
        if !pattern.is_empty() {
            result.push(LocalFileCleaner::new(storage_path, pattern)?);
        }
    }
    Ok(result)
}
