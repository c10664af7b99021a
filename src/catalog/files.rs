//! Build metadata records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Download locator for a build binary.
///
/// Locators are minted per request and expire server-side; an expired URL
/// must be refreshed by re-fetching the modfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    /// URL the binary can be fetched from.
    pub binary_url: String,
    /// When the URL stops being honored.
    pub date_expires: DateTime<Utc>,
}

/// Metadata for one uploaded build of a mod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modfile {
    /// Catalog id of the build.
    pub id: u32,
    /// Mod the build belongs to.
    pub mod_id: u32,
    /// When the build was uploaded.
    pub date_added: DateTime<Utc>,
    /// Size of the archive in bytes.
    pub file_size: u64,
    /// MD5 of the archive, lowercase hex.
    pub md5: String,
    /// Original archive filename.
    pub file_name: String,
    /// Author-supplied version label, empty when unset.
    pub version: String,
    /// Author-supplied changelog, empty when unset.
    pub changelog: String,
    /// Where to fetch the binary from.
    pub download: Download,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_modfile_round_trip() {
        let modfile = Modfile {
            id: 900,
            mod_id: 42,
            date_added: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            file_size: 1_048_576,
            md5: "9e107d9d372bb6826bd81d3542a419d6".to_string(),
            file_name: "hexpack.zip".to_string(),
            version: "1.2.0".to_string(),
            changelog: "Fixed pathing on water tiles".to_string(),
            download: Download {
                binary_url: "https://files.example/hexpack.zip?key=abc".to_string(),
                date_expires: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
            },
        };

        let json = serde_json::to_string(&modfile).unwrap();
        let back: Modfile = serde_json::from_str(&json).unwrap();
        assert_eq!(modfile, back);
    }
}
