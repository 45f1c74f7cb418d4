use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{CURRENT_VERSION, RepoRecord};
use crate::error::GopathsError;

/// The TOML file holding one [`RepoRecord`].
#[derive(Debug, Clone)]
pub struct RepoStore {
    path: PathBuf,
}

impl RepoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record, creating an empty store file if none exists yet.
    pub fn load(&self) -> Result<RepoRecord, GopathsError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "repo store missing, creating it");
            self.create_empty()?;
            return Ok(RepoRecord::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| GopathsError::StorageRead {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(RepoRecord::default());
        }

        let mut record: RepoRecord =
            toml::from_str(&content).map_err(|source| GopathsError::StorageParse {
                path: self.path.clone(),
                source,
            })?;

        if record.version == 0 {
            record.version = CURRENT_VERSION;
        } else if record.version > CURRENT_VERSION {
            return Err(GopathsError::UnsupportedVersion {
                path: self.path.clone(),
                found: record.version,
                supported: CURRENT_VERSION,
            });
        }
        repair(&mut record, &self.path);
        Ok(record)
    }

    /// Write the record through a sibling temp file so the store is never half-written.
    pub fn save(&self, record: &RepoRecord) -> Result<(), GopathsError> {
        let data = toml::to_string(record)?;
        self.ensure_parent()?;

        let temp_path = self.temp_path();
        if let Err(source) = fs::write(&temp_path, data) {
            let _ = fs::remove_file(&temp_path);
            return Err(GopathsError::StorageWrite {
                path: temp_path,
                source,
            });
        }
        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            GopathsError::StorageWrite {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(path = %self.path.display(), managed = record.managed_paths.len(), "saved repo store");
        Ok(())
    }

    fn create_empty(&self) -> Result<(), GopathsError> {
        self.ensure_parent()?;
        fs::write(&self.path, "").map_err(|source| GopathsError::StorageWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn ensure_parent(&self) -> Result<(), GopathsError> {
        let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        fs::create_dir_all(parent).map_err(|source| GopathsError::StorageWrite {
            path: parent.to_path_buf(),
            source,
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Drop duplicates and dangling disabled entries left by hand edits.
fn repair(record: &mut RepoRecord, path: &Path) {
    let before = record.managed_paths.len();
    let mut seen: Vec<String> = Vec::with_capacity(before);
    record.managed_paths.retain(|p| {
        if seen.contains(p) {
            false
        } else {
            seen.push(p.clone());
            true
        }
    });
    if record.managed_paths.len() != before {
        warn!(path = %path.display(), "dropped duplicate managed paths");
    }

    let before = record.disabled_paths.len();
    let mut seen: Vec<String> = Vec::with_capacity(before);
    record.disabled_paths.retain(|p| {
        let keep = record.managed_paths.contains(p) && !seen.contains(p);
        if keep {
            seen.push(p.clone());
        }
        keep
    });
    if record.disabled_paths.len() != before {
        warn!(path = %path.display(), "dropped disabled paths that are not managed");
    }
}
