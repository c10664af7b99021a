//! Storage driver backed by the local filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::StorageDriver;

/// [`StorageDriver`] over `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageDriver for LocalStorage {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn delete_dir(&self, path: &Path) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();
        let path = temp.path().join("a/b/c.data");

        storage.write_file(&path, b"payload").unwrap();

        assert_eq!(storage.read_file(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();

        let err = storage.read_file(&temp.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_delete_file_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();
        let path = temp.path().join("gone.data");

        storage.write_file(&path, b"x").unwrap();
        storage.delete_file(&path).unwrap();
        storage.delete_file(&path).unwrap();

        assert!(!storage.exists(&path));
    }

    #[test]
    fn test_delete_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();
        let dir = temp.path().join("tree");

        storage.write_file(&dir.join("inner/file.data"), b"x").unwrap();
        storage.delete_dir(&dir).unwrap();
        storage.delete_dir(&dir).unwrap();

        assert!(!storage.exists(&dir));
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();

        storage.write_file(&temp.path().join("b.data"), b"2").unwrap();
        storage.write_file(&temp.path().join("a.data"), b"1").unwrap();
        storage.create_dir_all(&temp.path().join("subdir")).unwrap();

        let files = storage.list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.data"), temp.path().join("b.data")]
        );
    }

    #[test]
    fn test_list_dirs_skips_files() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();

        storage.create_dir_all(&temp.path().join("x")).unwrap();
        storage.create_dir_all(&temp.path().join("y")).unwrap();
        storage.write_file(&temp.path().join("f.data"), b"1").unwrap();

        let dirs = storage.list_dirs(temp.path()).unwrap();
        assert_eq!(dirs, vec![temp.path().join("x"), temp.path().join("y")]);
    }

    #[test]
    fn test_list_missing_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let storage = LocalStorage::new();

        let err = storage.list_files(&temp.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
