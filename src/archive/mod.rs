//! Archive codec boundary.
//!
//! Installation extracts cached build archives, and the submission pipeline
//! packages gallery uploads; both go through [`ArchiveCodec`] so the format
//! stays swappable. [`ZipArchiver`] is the default implementation.

mod zip;

pub use self::zip::ZipArchiver;

use std::path::Path;

use thiserror::Error;

/// Errors from archive extraction or creation.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Reading or writing file data failed.
    #[error("archive I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive bytes could not be parsed.
    #[error("malformed archive: {reason}")]
    Malformed { reason: String },

    /// An entry path would land outside the destination directory.
    #[error("archive entry escapes destination: {name}")]
    UnsafeEntry { name: String },
}

/// One file to place into a created archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the entry inside the archive.
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Codec for the archive format build binaries ship in.
///
/// Implementations write extracted files directly to the filesystem; the
/// destination directory is expected to exist.
pub trait ArchiveCodec: Send + Sync {
    /// Extract an archive into `dest_dir`, returning the number of files
    /// written. Entries that would escape `dest_dir` abort the extraction.
    fn extract(&self, archive: &[u8], dest_dir: &Path) -> Result<usize, ArchiveError>;

    /// Build an archive holding the given entries.
    fn create(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError>;
}
