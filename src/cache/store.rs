//! Generic record and blob cache over the storage driver.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::stats::CacheStats;
use crate::storage::DynStorage;

/// Disk-backed object cache.
///
/// Records serialize to JSON; binary payloads are stored as-is. Writes that
/// fail are logged and reported as `false`, which callers treat as "not
/// cached" rather than fatal. Loads that hit a corrupt record delete the
/// offending file so the corruption cannot recur on every read.
///
/// The store owns no paths of its own; callers resolve them through
/// [`CacheLayout`](super::CacheLayout).
#[derive(Clone)]
pub struct CacheStore {
    storage: DynStorage,
    stats: Arc<Mutex<CacheStats>>,
}

impl CacheStore {
    /// Create a store over the given driver.
    pub fn new(storage: DynStorage) -> Self {
        Self {
            storage,
            stats: Arc::new(Mutex::new(CacheStats::new())),
        }
    }

    /// Serialize a record to JSON and write it at `path`.
    ///
    /// Returns `false` when serialization or the write fails; the failure
    /// is logged and the cache simply does not hold the record.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> bool {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to serialize cache record");
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_write_failure();
                }
                return false;
            }
        };
        self.write_bytes(path, &bytes)
    }

    /// Write a binary payload at `path`.
    pub fn save_binary(&self, path: &Path, bytes: &[u8]) -> bool {
        self.write_bytes(path, bytes)
    }

    /// Load and deserialize the record at `path`.
    ///
    /// Returns `None` when the file is absent or unreadable. A record that
    /// fails to parse is deleted before returning `None`.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let bytes = self.read_bytes(path)?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_hit();
                }
                Some(value)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt cache record, deleting");
                self.heal(path);
                None
            }
        }
    }

    /// Load the binary payload at `path`.
    pub fn load_binary(&self, path: &Path) -> Option<Vec<u8>> {
        let bytes = self.read_bytes(path)?;
        if let Ok(mut stats) = self.stats.lock() {
            stats.record_hit();
        }
        Some(bytes)
    }

    /// Delete the file at `path`. Deleting an absent file succeeds.
    pub fn delete(&self, path: &Path) -> bool {
        match self.storage.delete_file(path) {
            Ok(()) => {
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_delete();
                }
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache delete failed");
                false
            }
        }
    }

    /// Delete a directory and everything cached under it.
    pub fn delete_tree(&self, dir: &Path) -> bool {
        match self.storage.delete_dir(dir) {
            Ok(()) => {
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_delete();
                }
                true
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cache tree delete failed");
                false
            }
        }
    }

    /// Lazily parse every record file directly inside `dir`.
    ///
    /// Corrupt entries are skipped (and deleted, as in [`CacheStore::load`]).
    /// A missing directory yields an empty sequence.
    pub fn iter_records<T: DeserializeOwned>(&self, dir: &Path) -> impl Iterator<Item = T> + '_ {
        self.list_or_empty(self.storage.list_files(dir), dir)
            .into_iter()
            .filter_map(move |path| self.load(&path))
    }

    /// For each immediate subdirectory of `parent`, lazily parse the record
    /// stored as `file_name` inside it.
    ///
    /// Subdirectories without the file count as misses and are skipped;
    /// tolerance rules otherwise match [`CacheStore::iter_records`].
    pub fn iter_subdir_records<T: DeserializeOwned>(
        &self,
        parent: &Path,
        file_name: &str,
    ) -> impl Iterator<Item = T> + '_ {
        let file_name = file_name.to_string();
        self.list_or_empty(self.storage.list_dirs(parent), parent)
            .into_iter()
            .filter_map(move |dir| self.load(&dir.join(&file_name)))
    }

    /// Snapshot of the statistics counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> bool {
        match self.storage.write_file(path, bytes) {
            Ok(()) => {
                debug!(path = %path.display(), bytes = bytes.len(), "cache write");
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_write();
                }
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache write failed");
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_write_failure();
                }
                false
            }
        }
    }

    fn read_bytes(&self, path: &Path) -> Option<Vec<u8>> {
        match self.storage.read_file(path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "cache read failed");
                }
                if let Ok(mut stats) = self.stats.lock() {
                    stats.record_miss();
                }
                None
            }
        }
    }

    /// Remove a corrupt record so the parse failure does not recur.
    fn heal(&self, path: &Path) {
        if let Err(e) = self.storage.delete_file(path) {
            warn!(path = %path.display(), error = %e, "failed to delete corrupt cache record");
        }
        if let Ok(mut stats) = self.stats.lock() {
            stats.record_corrupt_eviction();
            stats.record_miss();
        }
    }

    fn list_or_empty(
        &self,
        listing: io::Result<Vec<std::path::PathBuf>>,
        dir: &Path,
    ) -> Vec<std::path::PathBuf> {
        match listing {
            Ok(paths) => paths,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(dir = %dir.display(), error = %e, "cache listing failed");
                }
                Vec::new()
            }
        }
    }
}
