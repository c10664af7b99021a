//! Versioned install store for extracted mod content.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::archive::{ArchiveCodec, ArchiveError};
use crate::cache::{CacheLayout, CacheStore};
use crate::catalog::NULL_ID;
use crate::storage::DynStorage;

use super::dirname::{install_dir_name, parse_install_dir_name};

/// Errors from install and uninstall operations.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Id zero is reserved for unmanaged content and never names a mod.
    #[error("Mod id and modfile id must be non-zero")]
    NullId,
    /// The archive for this version has not been downloaded into the cache.
    #[error("No cached archive for mod {mod_id} modfile {modfile_id}")]
    BinaryNotCached { mod_id: u32, modfile_id: u32 },
    /// An already-installed version could not be removed.
    #[error("Failed to remove installed directory {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The destination directory could not be created.
    #[error("Failed to create install directory {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Archive extraction failed; the partial directory is left behind.
    #[error("Failed to extract archive into {path}: {source}")]
    ExtractFailed {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },
}

/// Tuning knobs for the install manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Delete the cached archive once its contents are installed.
    pub reclaim_archives: bool,
}

/// One installed mod version, as decoded from its directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledMod {
    pub mod_id: u32,
    pub modfile_id: u32,
    /// Directory holding the extracted content.
    pub path: PathBuf,
}

impl InstalledMod {
    /// Returns true for content not managed by the catalog, such as a
    /// directory the user dropped into the install root by hand.
    pub fn is_drop_in(&self) -> bool {
        self.mod_id == NULL_ID
    }
}

/// Store for installing, enumerating, and removing mod content.
///
/// At most one version of a mod is installed at a time: installing a new
/// modfile first removes every other version of the same mod. Operations on
/// the same mod id are serialized through a per-mod advisory lock, so two
/// concurrent installs cannot leave two versions behind.
///
/// The archive codec extracts through the local filesystem, so the install
/// root must be a real directory when `install` is used; enumeration and
/// removal work against any storage driver.
pub struct InstallManager {
    root: PathBuf,
    storage: DynStorage,
    cache: CacheStore,
    layout: CacheLayout,
    archiver: Arc<dyn ArchiveCodec>,
    options: InstallOptions,
    locks: DashMap<u32, Arc<Mutex<()>>>,
}

impl InstallManager {
    pub fn new(
        install_root: impl Into<PathBuf>,
        storage: DynStorage,
        cache: CacheStore,
        layout: CacheLayout,
        archiver: Arc<dyn ArchiveCodec>,
        options: InstallOptions,
    ) -> Self {
        Self {
            root: install_root.into(),
            storage,
            cache,
            layout,
            archiver,
            options,
            locks: DashMap::new(),
        }
    }

    /// Root directory where mod content is installed.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Install a modfile from its cached archive.
    ///
    /// The archive must already be in the cache; a missing archive fails
    /// before anything on disk changes. Every previously installed version
    /// of the mod is removed first. Extraction failure leaves the partial
    /// directory in place so a retry can overwrite it.
    pub fn install(&self, mod_id: u32, modfile_id: u32) -> Result<InstalledMod, InstallError> {
        if mod_id == NULL_ID || modfile_id == NULL_ID {
            return Err(InstallError::NullId);
        }
        let cell = self.locks.entry(mod_id).or_default().clone();
        let _guard = cell.lock().unwrap();

        let archive_path = self.layout.mod_binary_path(mod_id, modfile_id);
        let archive = self
            .cache
            .load_binary(&archive_path)
            .ok_or(InstallError::BinaryNotCached { mod_id, modfile_id })?;

        self.remove_versions_of(mod_id)?;

        let dest = self.root.join(install_dir_name(mod_id, modfile_id));
        self.storage
            .create_dir_all(&dest)
            .map_err(|source| InstallError::CreateFailed {
                path: dest.clone(),
                source,
            })?;

        let entries = self.archiver.extract(&archive, &dest).map_err(|source| {
            warn!(
                mod_id,
                modfile_id,
                path = %dest.display(),
                error = %source,
                "extraction failed, leaving partial install for retry"
            );
            InstallError::ExtractFailed {
                path: dest.clone(),
                source,
            }
        })?;

        info!(mod_id, modfile_id, entries, path = %dest.display(), "installed mod");

        if self.options.reclaim_archives {
            self.cache.delete(&archive_path);
            debug!(mod_id, modfile_id, "reclaimed cached archive");
        }

        Ok(InstalledMod {
            mod_id,
            modfile_id,
            path: dest,
        })
    }

    /// Remove every installed version of a mod. Nothing installed is
    /// already success.
    pub fn uninstall(&self, mod_id: u32) -> Result<(), InstallError> {
        if mod_id == NULL_ID {
            return Err(InstallError::NullId);
        }
        let cell = self.locks.entry(mod_id).or_default().clone();
        let _guard = cell.lock().unwrap();

        self.remove_versions_of(mod_id)
    }

    /// Remove one specific installed version. Absent is already success.
    pub fn uninstall_version(&self, mod_id: u32, modfile_id: u32) -> Result<(), InstallError> {
        if mod_id == NULL_ID || modfile_id == NULL_ID {
            return Err(InstallError::NullId);
        }
        let cell = self.locks.entry(mod_id).or_default().clone();
        let _guard = cell.lock().unwrap();

        let dir = self.root.join(install_dir_name(mod_id, modfile_id));
        self.storage
            .delete_dir(&dir)
            .map_err(|source| InstallError::RemoveFailed { path: dir, source })
    }

    /// List installed content, optionally keeping only the given mod ids.
    ///
    /// Directory names that do not decode to a managed pair come back under
    /// [`NULL_ID`], so a filter built from real mod ids drops them and a
    /// filter containing `NULL_ID` keeps them. A missing root is an empty
    /// listing.
    pub fn list(&self, filter: Option<&HashSet<u32>>) -> Vec<InstalledMod> {
        let mut mods = Vec::new();
        for path in self.installed_dirs() {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let (mod_id, modfile_id) = parse_install_dir_name(name);
            if let Some(wanted) = filter {
                if !wanted.contains(&mod_id) {
                    continue;
                }
            }
            mods.push(InstalledMod {
                mod_id,
                modfile_id,
                path,
            });
        }
        mods
    }

    /// The currently installed version of a mod, if any.
    pub fn installed_version(&self, mod_id: u32) -> Option<InstalledMod> {
        if mod_id == NULL_ID {
            return None;
        }
        self.list(None)
            .into_iter()
            .find(|m| m.mod_id == mod_id)
    }

    fn remove_versions_of(&self, mod_id: u32) -> Result<(), InstallError> {
        for path in self.installed_dirs() {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let (owner, modfile_id) = parse_install_dir_name(name);
            if owner != mod_id {
                continue;
            }
            self.storage
                .delete_dir(&path)
                .map_err(|source| InstallError::RemoveFailed {
                    path: path.clone(),
                    source,
                })?;
            debug!(mod_id, modfile_id, path = %path.display(), "removed installed version");
        }
        Ok(())
    }

    fn installed_dirs(&self) -> Vec<PathBuf> {
        match self.storage.list_dirs(&self.root) {
            Ok(dirs) => dirs,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "failed to list install root");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{ArchiveEntry, ZipArchiver};
    use crate::storage::{LocalStorage, MemoryStorage};
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn memory_manager(root: &str) -> (InstallManager, DynStorage) {
        let storage: DynStorage = Arc::new(MemoryStorage::new());
        let manager = InstallManager::new(
            root,
            Arc::clone(&storage),
            CacheStore::new(Arc::clone(&storage)),
            CacheLayout::new("/cache"),
            Arc::new(ZipArchiver::new()),
            InstallOptions::default(),
        );
        (manager, storage)
    }

    fn disk_manager(
        temp: &TempDir,
        options: InstallOptions,
    ) -> (InstallManager, CacheStore, CacheLayout) {
        let storage: DynStorage = Arc::new(LocalStorage::new());
        let cache = CacheStore::new(Arc::clone(&storage));
        let layout = CacheLayout::new(temp.path().join("cache"));
        let manager = InstallManager::new(
            temp.path().join("installs"),
            storage,
            cache.clone(),
            layout.clone(),
            Arc::new(ZipArchiver::new()),
            options,
        );
        (manager, cache, layout)
    }

    fn stage_archive(cache: &CacheStore, layout: &CacheLayout, mod_id: u32, modfile_id: u32) {
        let entries = vec![
            ArchiveEntry::new("readme.txt", format!("modfile {modfile_id}").into_bytes()),
            ArchiveEntry::new("data/level.bin", vec![0, 1, 2, 3]),
        ];
        let bytes = ZipArchiver::new().create(&entries).unwrap();
        assert!(cache.save_binary(&layout.mod_binary_path(mod_id, modfile_id), &bytes));
    }

    #[test]
    fn test_null_ids_rejected() {
        let (manager, _) = memory_manager("/installs");
        assert!(matches!(manager.install(0, 5), Err(InstallError::NullId)));
        assert!(matches!(manager.install(5, 0), Err(InstallError::NullId)));
        assert!(matches!(manager.uninstall(0), Err(InstallError::NullId)));
        assert!(matches!(
            manager.uninstall_version(0, 1),
            Err(InstallError::NullId)
        ));
        assert!(matches!(
            manager.uninstall_version(1, 0),
            Err(InstallError::NullId)
        ));
    }

    #[test]
    fn test_install_without_cached_archive() {
        let (manager, storage) = memory_manager("/installs");
        let result = manager.install(12, 900);
        assert!(matches!(
            result,
            Err(InstallError::BinaryNotCached {
                mod_id: 12,
                modfile_id: 900,
            })
        ));
        assert!(!storage.exists(Path::new("/installs/12_900")));
    }

    #[test]
    fn test_install_extracts_archive() {
        let temp = TempDir::new().unwrap();
        let (manager, cache, layout) = disk_manager(&temp, InstallOptions::default());
        stage_archive(&cache, &layout, 12, 900);

        let installed = manager.install(12, 900).unwrap();
        assert_eq!(installed.mod_id, 12);
        assert_eq!(installed.modfile_id, 900);
        assert_eq!(installed.path, temp.path().join("installs/12_900"));

        let readme = fs::read_to_string(installed.path.join("readme.txt")).unwrap();
        assert_eq!(readme, "modfile 900");
        assert_eq!(
            fs::read(installed.path.join("data/level.bin")).unwrap(),
            vec![0, 1, 2, 3]
        );
        // Archive stays cached unless reclaiming is enabled.
        assert!(cache
            .load_binary(&layout.mod_binary_path(12, 900))
            .is_some());
    }

    #[test]
    fn test_install_replaces_previous_version() {
        let temp = TempDir::new().unwrap();
        let (manager, cache, layout) = disk_manager(&temp, InstallOptions::default());
        stage_archive(&cache, &layout, 12, 900);
        stage_archive(&cache, &layout, 12, 901);

        manager.install(12, 900).unwrap();
        manager.install(12, 901).unwrap();

        assert!(!temp.path().join("installs/12_900").exists());
        assert!(temp.path().join("installs/12_901").exists());

        let installed = manager.list(None);
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].modfile_id, 901);
    }

    #[test]
    fn test_install_leaves_other_mods_alone() {
        let temp = TempDir::new().unwrap();
        let (manager, cache, layout) = disk_manager(&temp, InstallOptions::default());
        stage_archive(&cache, &layout, 12, 900);
        stage_archive(&cache, &layout, 34, 70);

        manager.install(12, 900).unwrap();
        manager.install(34, 70).unwrap();

        assert!(temp.path().join("installs/12_900").exists());
        assert!(temp.path().join("installs/34_70").exists());
    }

    #[test]
    fn test_install_reclaims_archive_when_configured() {
        let temp = TempDir::new().unwrap();
        let options = InstallOptions {
            reclaim_archives: true,
        };
        let (manager, cache, layout) = disk_manager(&temp, options);
        stage_archive(&cache, &layout, 12, 900);

        manager.install(12, 900).unwrap();
        assert!(cache
            .load_binary(&layout.mod_binary_path(12, 900))
            .is_none());
    }

    #[test]
    fn test_uninstall_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let (manager, cache, layout) = disk_manager(&temp, InstallOptions::default());
        stage_archive(&cache, &layout, 12, 900);
        manager.install(12, 900).unwrap();

        manager.uninstall(12).unwrap();
        assert!(!temp.path().join("installs/12_900").exists());
        // Second removal of an absent mod is still success.
        manager.uninstall(12).unwrap();
    }

    #[test]
    fn test_uninstall_version_removes_only_that_directory() {
        let (manager, storage) = memory_manager("/installs");
        storage.create_dir_all(Path::new("/installs/12_900")).unwrap();
        storage.create_dir_all(Path::new("/installs/34_70")).unwrap();

        manager.uninstall_version(12, 900).unwrap();
        assert!(!storage.exists(Path::new("/installs/12_900")));
        assert!(storage.exists(Path::new("/installs/34_70")));

        manager.uninstall_version(12, 900).unwrap();
    }

    #[test]
    fn test_list_missing_root_is_empty() {
        let (manager, _) = memory_manager("/installs");
        assert!(manager.list(None).is_empty());
    }

    #[test]
    fn test_list_decodes_drop_ins() {
        let (manager, storage) = memory_manager("/installs");
        storage.create_dir_all(Path::new("/installs/12_900")).unwrap();
        storage.create_dir_all(Path::new("/installs/34_70")).unwrap();
        storage
            .create_dir_all(Path::new("/installs/HandPlacedPack"))
            .unwrap();

        let all = manager.list(None);
        assert_eq!(all.len(), 3);
        let drop_ins: Vec<_> = all.iter().filter(|m| m.is_drop_in()).collect();
        assert_eq!(drop_ins.len(), 1);
        assert_eq!(drop_ins[0].modfile_id, NULL_ID);

        let filtered = manager.list(Some(&HashSet::from([12])));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].mod_id, 12);

        // A filter carrying the null id keeps unmanaged directories too.
        let with_drop_ins = manager.list(Some(&HashSet::from([12, NULL_ID])));
        assert_eq!(with_drop_ins.len(), 2);
    }

    #[test]
    fn test_installed_version() {
        let (manager, storage) = memory_manager("/installs");
        storage.create_dir_all(Path::new("/installs/12_900")).unwrap();

        let current = manager.installed_version(12).unwrap();
        assert_eq!(current.modfile_id, 900);
        assert!(manager.installed_version(34).is_none());
        assert!(manager.installed_version(NULL_ID).is_none());
    }

    #[test]
    fn test_concurrent_installs_leave_single_version() {
        let temp = TempDir::new().unwrap();
        let (manager, cache, layout) = disk_manager(&temp, InstallOptions::default());
        stage_archive(&cache, &layout, 12, 900);
        stage_archive(&cache, &layout, 12, 901);

        let manager = Arc::new(manager);
        let handles: Vec<_> = [900u32, 901u32]
            .into_iter()
            .map(|modfile_id| {
                let manager = Arc::clone(&manager);
                thread::spawn(move || manager.install(12, modfile_id))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let installed = manager.list(None);
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].mod_id, 12);
        assert!([900, 901].contains(&installed[0].modfile_id));
    }
}
