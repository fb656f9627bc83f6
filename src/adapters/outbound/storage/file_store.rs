use crate::ports::outbound::KeyValueStore;
use crate::shared::error::CompatError;
use crate::shared::security::{read_regular_file, validate_not_symlink};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name used under the site root when no state directory is set
pub const DEFAULT_STATE_DIR: &str = ".wp-plugin-compat";

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// FileStore adapter persisting each key as one JSON file
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so a reader sees either the previous or the
/// new entry. Expired transients are removed when read.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) the state directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() {
            validate_not_symlink(&dir, "state directory")?;
        }
        fs::create_dir_all(&dir).map_err(|e| CompatError::StoreError {
            path: dir.clone(),
            details: format!("Failed to create state directory: {}", e),
        })?;
        tracing::debug!(dir = %dir.display(), "opened state store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a key such as `pcc_scan_results:site` to a file name
    fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '.'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_stem))
    }

    fn store_error(path: &Path, details: impl Into<String>) -> anyhow::Error {
        CompatError::StoreError {
            path: path.to_path_buf(),
            details: details.into(),
        }
        .into()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = read_regular_file(&path, "state entry")?;
        let entry: StoredEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, path = %path.display(), error = %e, "ignoring unreadable state entry");
                return Ok(None);
            }
        };

        if entry.is_expired(Utc::now()) {
            tracing::debug!(key, "state entry expired");
            self.delete(key)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()> {
        let path = self.path_for(key);
        let expires_at = match ttl {
            Some(ttl) => {
                let delta = chrono::Duration::from_std(ttl)
                    .map_err(|e| Self::store_error(&path, format!("Invalid TTL: {}", e)))?;
                let expires_at = Utc::now().checked_add_signed(delta).ok_or_else(|| {
                    Self::store_error(&path, format!("TTL of {}s is out of range", ttl.as_secs()))
                })?;
                Some(expires_at)
            }
            None => None,
        };
        let body = serde_json::to_vec_pretty(&StoredEntry { value, expires_at })?;

        let mut temp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| Self::store_error(&path, format!("Failed to create temp file: {}", e)))?;
        temp.write_all(&body)
            .and_then(|_| temp.flush())
            .map_err(|e| Self::store_error(&path, format!("Failed to write entry: {}", e)))?;
        temp.persist(&path)
            .map_err(|e| Self::store_error(&path, format!("Failed to replace entry: {}", e.error)))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::store_error(&path, format!("Failed to delete entry: {}", e))),
        }
    }
}
