//! Media descriptors: logos, avatars, gallery images, and the version
//! bookkeeping used to detect stale cached renditions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Available renditions of a mod logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogoSize {
    /// The uploaded source image.
    Original,
    /// 320x180 thumbnail.
    Thumb320x180,
    /// 640x360 thumbnail.
    Thumb640x360,
    /// 1280x720 thumbnail.
    Thumb1280x720,
}

impl LogoSize {
    /// Stable identifier used in cache paths and version records.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoSize::Original => "original",
            LogoSize::Thumb320x180 => "320x180",
            LogoSize::Thumb640x360 => "640x360",
            LogoSize::Thumb1280x720 => "1280x720",
        }
    }
}

impl fmt::Display for LogoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Available renditions of a user avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarSize {
    /// The uploaded source image.
    Original,
    /// 50x50 thumbnail.
    Thumb50x50,
    /// 100x100 thumbnail.
    Thumb100x100,
}

impl AvatarSize {
    /// Stable identifier used in cache paths and version records.
    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarSize::Original => "original",
            AvatarSize::Thumb50x50 => "50x50",
            AvatarSize::Thumb100x100 => "100x100",
        }
    }
}

impl fmt::Display for AvatarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Available renditions of a gallery image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GallerySize {
    /// The uploaded source image.
    Original,
    /// 320x180 thumbnail.
    Thumb320x180,
}

impl GallerySize {
    /// Stable identifier used in cache paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            GallerySize::Original => "original",
            GallerySize::Thumb320x180 => "320x180",
        }
    }
}

impl fmt::Display for GallerySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Remote locations of every logo rendition, plus the source filename
/// identifying which upload they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogoImageSet {
    /// Filename of the uploaded source image.
    pub file_name: String,
    /// URL of the source image.
    pub original: String,
    /// URL of the 320x180 rendition.
    pub thumb_320x180: String,
    /// URL of the 640x360 rendition.
    pub thumb_640x360: String,
    /// URL of the 1280x720 rendition.
    pub thumb_1280x720: String,
}

impl LogoImageSet {
    /// URL for the requested rendition.
    pub fn url_for(&self, size: LogoSize) -> &str {
        match size {
            LogoSize::Original => &self.original,
            LogoSize::Thumb320x180 => &self.thumb_320x180,
            LogoSize::Thumb640x360 => &self.thumb_640x360,
            LogoSize::Thumb1280x720 => &self.thumb_1280x720,
        }
    }
}

/// Remote locations of every avatar rendition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvatarImageSet {
    /// Filename of the uploaded source image.
    pub file_name: String,
    /// URL of the source image.
    pub original: String,
    /// URL of the 50x50 rendition.
    pub thumb_50x50: String,
    /// URL of the 100x100 rendition.
    pub thumb_100x100: String,
}

impl AvatarImageSet {
    /// URL for the requested rendition.
    pub fn url_for(&self, size: AvatarSize) -> &str {
        match size {
            AvatarSize::Original => &self.original,
            AvatarSize::Thumb50x50 => &self.thumb_50x50,
            AvatarSize::Thumb100x100 => &self.thumb_100x100,
        }
    }
}

/// One image in a mod's gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Filename of the uploaded image, unique within the gallery.
    pub file_name: String,
    /// URL of the source image.
    pub original: String,
    /// URL of the 320x180 rendition.
    pub thumb_320x180: String,
}

impl GalleryImage {
    /// URL for the requested rendition.
    pub fn url_for(&self, size: GallerySize) -> &str {
        match size {
            GallerySize::Original => &self.original,
            GallerySize::Thumb320x180 => &self.thumb_320x180,
        }
    }
}

/// All media attached to a mod profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModMedia {
    /// Full YouTube video URLs.
    pub youtube_urls: Vec<String>,
    /// Full Sketchfab model URLs.
    pub sketchfab_urls: Vec<String>,
    /// Gallery images, in display order.
    pub gallery_images: Vec<GalleryImage>,
}

/// Companion record stored beside cached logo/avatar renditions.
///
/// Maps a rendition key (see [`LogoSize::as_str`]) to the source filename
/// the cached file was derived from. A cached rendition whose recorded
/// source no longer matches the profile's current upload is stale and gets
/// re-fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageVersions {
    sources: BTreeMap<String, String>,
}

impl ImageVersions {
    /// Source filename recorded for a rendition, if any.
    pub fn source(&self, size_key: &str) -> Option<&str> {
        self.sources.get(size_key).map(String::as_str)
    }

    /// Record the source filename a rendition was derived from.
    pub fn set_source(&mut self, size_key: &str, file_name: &str) {
        self.sources
            .insert(size_key.to_string(), file_name.to_string());
    }

    /// Whether the recorded source for a rendition matches `file_name`.
    pub fn matches(&self, size_key: &str, file_name: &str) -> bool {
        self.source(size_key) == Some(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_size_as_str() {
        assert_eq!(LogoSize::Original.as_str(), "original");
        assert_eq!(LogoSize::Thumb320x180.as_str(), "320x180");
        assert_eq!(LogoSize::Thumb640x360.as_str(), "640x360");
        assert_eq!(LogoSize::Thumb1280x720.as_str(), "1280x720");
    }

    #[test]
    fn test_logo_url_for_size() {
        let logo = LogoImageSet {
            file_name: "card.png".to_string(),
            original: "https://media.example/card.png".to_string(),
            thumb_320x180: "https://media.example/card_320.png".to_string(),
            thumb_640x360: "https://media.example/card_640.png".to_string(),
            thumb_1280x720: "https://media.example/card_1280.png".to_string(),
        };

        assert_eq!(logo.url_for(LogoSize::Original), "https://media.example/card.png");
        assert_eq!(
            logo.url_for(LogoSize::Thumb640x360),
            "https://media.example/card_640.png"
        );
    }

    #[test]
    fn test_avatar_url_for_size() {
        let avatar = AvatarImageSet {
            file_name: "me.png".to_string(),
            original: "https://media.example/me.png".to_string(),
            thumb_50x50: "https://media.example/me_50.png".to_string(),
            thumb_100x100: "https://media.example/me_100.png".to_string(),
        };

        assert_eq!(avatar.url_for(AvatarSize::Thumb50x50), "https://media.example/me_50.png");
    }

    #[test]
    fn test_image_versions_tracks_sources() {
        let mut versions = ImageVersions::default();
        assert_eq!(versions.source("original"), None);
        assert!(!versions.matches("original", "card.png"));

        versions.set_source("original", "card.png");
        assert_eq!(versions.source("original"), Some("card.png"));
        assert!(versions.matches("original", "card.png"));
        assert!(!versions.matches("original", "newer.png"));
    }

    #[test]
    fn test_image_versions_rendition_keys_independent() {
        let mut versions = ImageVersions::default();
        versions.set_source("original", "card.png");
        versions.set_source("320x180", "older.png");

        assert!(versions.matches("original", "card.png"));
        assert!(!versions.matches("320x180", "card.png"));
    }

    #[test]
    fn test_image_versions_round_trip() {
        let mut versions = ImageVersions::default();
        versions.set_source("original", "card.png");

        let json = serde_json::to_string(&versions).unwrap();
        let back: ImageVersions = serde_json::from_str(&json).unwrap();
        assert_eq!(versions, back);
    }
}
