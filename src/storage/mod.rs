//! Platform file-I/O boundary.
//!
//! Every byte the SDK reads or writes goes through [`StorageDriver`], so the
//! whole cache and install lifecycle can run against an in-memory driver in
//! tests or a platform-specific one on exotic targets. [`LocalStorage`] is
//! the everyday implementation over `std::fs`.

mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handle to a storage driver.
pub type DynStorage = Arc<dyn StorageDriver>;

/// Synchronous file-system primitives the SDK is built on.
///
/// Implementations must distinguish "not found" from other failures via
/// [`io::ErrorKind::NotFound`]; callers rely on that to treat absence as a
/// cache miss rather than an error. Deleting something that does not exist
/// succeeds.
pub trait StorageDriver: Send + Sync {
    /// Read the full contents of a file.
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write a file, creating parent directories as needed and replacing
    /// any existing contents.
    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    /// Delete a file. Succeeds if the file does not exist.
    fn delete_file(&self, path: &Path) -> io::Result<()>;

    /// Delete a directory and everything under it. Succeeds if the
    /// directory does not exist.
    fn delete_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// List the files directly inside a directory, sorted by path.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// List the directories directly inside a directory, sorted by path.
    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Whether a file or directory exists at the path.
    fn exists(&self, path: &Path) -> bool;
}
