//! Key-value persistence
//!
//! The store only needs `get`/`set` on string keys. `FilePersistence`
//! keeps one file per key in the data directory and writes atomically
//! (temp file, fsync, rename) so a crash never leaves a half-written
//! snapshot. `MemoryPersistence` backs tests.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};
use crate::config::Config;

/// Key holding the plant snapshot
pub const PLANTS_KEY: &str = "plantpal_plants_v1";

/// Key holding the theme preference
pub const THEME_KEY: &str = "plantpal_theme_v1";

/// A string key-value store
pub trait Persistence {
    /// Read a key; `None` when it was never written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a key, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// File-per-key persistence rooted at a directory
#[derive(Debug, Clone)]
pub struct FilePersistence {
    dir: PathBuf,
}

impl FilePersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persistence rooted at the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }

    /// Total bytes stored across the known keys
    pub fn size_on_disk(&self) -> u64 {
        [PLANTS_KEY, THEME_KEY]
            .iter()
            .filter_map(|key| self.path_for(key).ok())
            .filter_map(|path| fs::metadata(path).ok())
            .map(|m| m.len())
            .sum()
    }
}

impl Persistence for FilePersistence {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from_io(e, key, path, false)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        atomic_write(key, &path, value.as_bytes())?;
        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file next to the target
/// 2. Sync the file to disk
/// 3. Rename the temp file over the target
fn atomic_write(key: &str, path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| StorageError::from_io(e, key, temp_path.clone(), true))?;
    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| StorageError::from_io(e, key, temp_path.clone(), true))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// In-memory persistence with failure injection
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key
    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Make every `get` fail
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every `set` fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw stored value, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Persistence for MemoryPersistence {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!("read of '{}' refused", key)));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(format!("write of '{}' refused", key)));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
