//! Zip implementation of the archive codec.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use tracing::debug;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::{ArchiveCodec, ArchiveEntry, ArchiveError};

/// [`ArchiveCodec`] over the zip format, deflate-compressed.
#[derive(Debug, Default, Clone)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

fn convert(e: ZipError) -> ArchiveError {
    match e {
        ZipError::Io(io) => ArchiveError::Io(io),
        other => ArchiveError::Malformed {
            reason: other.to_string(),
        },
    }
}

impl ArchiveCodec for ZipArchiver {
    fn extract(&self, archive: &[u8], dest_dir: &Path) -> Result<usize, ArchiveError> {
        let mut zip = ZipArchive::new(Cursor::new(archive)).map_err(convert)?;
        let mut extracted = 0;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(convert)?;
            let relative = entry.enclosed_name().ok_or_else(|| ArchiveError::UnsafeEntry {
                name: entry.name().to_string(),
            })?;
            let target = dest_dir.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&target)?;
            std::io::copy(&mut entry, &mut out)?;
            extracted += 1;
        }

        debug!(
            dest = %dest_dir.display(),
            files = extracted,
            "archive extracted"
        );
        Ok(extracted)
    }

    fn create(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in entries {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(convert)?;
            writer.write_all(&entry.bytes)?;
        }

        let cursor = writer.finish().map_err(convert)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries() -> Vec<ArchiveEntry> {
        vec![
            ArchiveEntry::new("readme.txt", b"hello".to_vec()),
            ArchiveEntry::new("data/table.bin", vec![0u8, 1, 2, 3]),
        ]
    }

    #[test]
    fn test_create_then_extract() {
        let archiver = ZipArchiver::new();
        let temp = TempDir::new().unwrap();

        let bytes = archiver.create(&entries()).unwrap();
        let count = archiver.extract(&bytes, temp.path()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read(temp.path().join("readme.txt")).unwrap(), b"hello");
        assert_eq!(
            fs::read(temp.path().join("data/table.bin")).unwrap(),
            vec![0u8, 1, 2, 3]
        );
    }

    #[test]
    fn test_extract_creates_nested_directories() {
        let archiver = ZipArchiver::new();
        let temp = TempDir::new().unwrap();
        let entries = vec![ArchiveEntry::new("a/b/c/deep.txt", b"deep".to_vec())];

        let bytes = archiver.create(&entries).unwrap();
        archiver.extract(&bytes, temp.path()).unwrap();

        assert_eq!(fs::read(temp.path().join("a/b/c/deep.txt")).unwrap(), b"deep");
    }

    #[test]
    fn test_create_empty_archive() {
        let archiver = ZipArchiver::new();
        let temp = TempDir::new().unwrap();

        let bytes = archiver.create(&[]).unwrap();
        let count = archiver.extract(&bytes, temp.path()).unwrap();

        assert_eq!(count, 0);
    }

    #[test]
    fn test_extract_garbage_is_malformed() {
        let archiver = ZipArchiver::new();
        let temp = TempDir::new().unwrap();

        let err = archiver.extract(b"this is not a zip", temp.path()).unwrap_err();
        assert!(matches!(err, ArchiveError::Malformed { .. }));
    }

    #[test]
    fn test_round_trip_preserves_exact_bytes() {
        let archiver = ZipArchiver::new();
        let temp = TempDir::new().unwrap();
        let payload: Vec<u8> = (0..=255).collect();
        let entries = vec![ArchiveEntry::new("blob.bin", payload.clone())];

        let bytes = archiver.create(&entries).unwrap();
        archiver.extract(&bytes, temp.path()).unwrap();

        assert_eq!(fs::read(temp.path().join("blob.bin")).unwrap(), payload);
    }
}
