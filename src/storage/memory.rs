//! In-memory storage driver.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::StorageDriver;

/// [`StorageDriver`] holding everything in process memory.
///
/// Used by tests and by headless hosts without writable storage. Paths are
/// compared textually, so callers must be consistent about how they build
/// them (the cache layer is, since all of its paths come from one resolver).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently stored.
    pub fn file_count(&self) -> usize {
        self.inner.lock().unwrap().files.len()
    }
}

impl Inner {
    fn record_ancestors(&mut self, path: &Path) {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn dir_known(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such entry: {}", path.display()),
    )
}

impl StorageDriver for MemoryStorage {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let inner = self.inner.lock().unwrap();
        inner.files.get(path).cloned().ok_or_else(|| not_found(path))
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.record_ancestors(path);
        inner.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.files.remove(path);
        Ok(())
    }

    fn delete_dir(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.dirs.retain(|d| !d.starts_with(path));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.record_ancestors(path);
        inner.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let inner = self.inner.lock().unwrap();
        if !inner.dir_known(dir) {
            return Err(not_found(dir));
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let inner = self.inner.lock().unwrap();
        if !inner.dir_known(dir) {
            return Err(not_found(dir));
        }
        Ok(inner
            .dirs
            .iter()
            .filter(|d| d.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        let path = Path::new("/cache/mods/1/profile.data");

        storage.write_file(path, b"payload").unwrap();

        assert_eq!(storage.read_file(path).unwrap(), b"payload");
        assert!(storage.exists(path));
    }

    #[test]
    fn test_write_records_ancestor_directories() {
        let storage = MemoryStorage::new();
        storage
            .write_file(Path::new("/cache/mods/1/profile.data"), b"x")
            .unwrap();

        assert!(storage.exists(Path::new("/cache/mods/1")));
        assert!(storage.exists(Path::new("/cache/mods")));
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.read_file(Path::new("/absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_dir_removes_subtree() {
        let storage = MemoryStorage::new();
        storage.write_file(Path::new("/cache/mods/1/profile.data"), b"a").unwrap();
        storage.write_file(Path::new("/cache/mods/1/stats.data"), b"b").unwrap();
        storage.write_file(Path::new("/cache/mods/2/profile.data"), b"c").unwrap();

        storage.delete_dir(Path::new("/cache/mods/1")).unwrap();

        assert!(!storage.exists(Path::new("/cache/mods/1/profile.data")));
        assert!(!storage.exists(Path::new("/cache/mods/1")));
        assert!(storage.exists(Path::new("/cache/mods/2/profile.data")));
    }

    #[test]
    fn test_list_files_only_immediate_children() {
        let storage = MemoryStorage::new();
        storage.write_file(Path::new("/cache/a.data"), b"1").unwrap();
        storage.write_file(Path::new("/cache/sub/b.data"), b"2").unwrap();

        let files = storage.list_files(Path::new("/cache")).unwrap();
        assert_eq!(files, vec![PathBuf::from("/cache/a.data")]);
    }

    #[test]
    fn test_list_dirs_only_immediate_children() {
        let storage = MemoryStorage::new();
        storage.write_file(Path::new("/cache/mods/1/profile.data"), b"x").unwrap();
        storage.write_file(Path::new("/cache/mods/2/profile.data"), b"y").unwrap();

        let dirs = storage.list_dirs(Path::new("/cache/mods")).unwrap();
        assert_eq!(
            dirs,
            vec![PathBuf::from("/cache/mods/1"), PathBuf::from("/cache/mods/2")]
        );
    }

    #[test]
    fn test_list_missing_directory_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.list_files(Path::new("/absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let storage = MemoryStorage::new();
        storage.delete_file(Path::new("/absent")).unwrap();
        storage.delete_dir(Path::new("/absent")).unwrap();
    }
}
