//! Request and response types shared with the wire client.

use thiserror::Error;

use crate::catalog::{ModStatus, ModVisibility};

/// Failure reported by the remote collaborator.
///
/// The SDK never interprets these beyond logging; they pass through to the
/// caller unchanged. Building requests and classifying transport failures
/// is entirely the wire client's concern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request did not complete within the client's deadline.
    #[error("request timed out: {url}")]
    Timeout { url: String },

    /// The connection could not be established.
    #[error("connection failed: {reason}")]
    Connect { reason: String },

    /// The server answered with a non-success status.
    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body could not be parsed.
    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Anything the other variants do not cover.
    #[error("{0}")]
    Other(String),
}

/// One page of a listed collection.
///
/// `total` is the size of the whole collection at the time the page was
/// served; the page cascade uses it to stop without issuing a trailing
/// empty request.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Total collection size when the page was served.
    pub total: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u32) -> Self {
        Self { items, total }
    }
}

/// Filter for listing mods.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModQuery {
    /// Game whose mods are listed.
    pub game_id: u32,
    /// Restrict to these mod ids; empty means no restriction.
    pub ids: Vec<u32>,
    /// Substring match against mod names.
    pub name_contains: Option<String>,
    /// Require all of these tags.
    pub tags: Vec<String>,
}

impl ModQuery {
    /// Query for every visible mod of a game.
    pub fn new(game_id: u32) -> Self {
        Self {
            game_id,
            ..Self::default()
        }
    }

    /// Restrict the query to specific mod ids.
    pub fn with_ids(mut self, ids: Vec<u32>) -> Self {
        self.ids = ids;
        self
    }

    /// Restrict the query to names containing `needle`.
    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    /// Require every listed tag.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Scalar profile fields to change, `None` meaning "leave as is".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub name_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub homepage_url: Option<String>,
    pub metadata_blob: Option<String>,
    pub visibility: Option<ModVisibility>,
    pub status: Option<ModStatus>,
}

impl ProfileChanges {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.name_id.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.homepage_url.is_none()
            && self.metadata_blob.is_none()
            && self.visibility.is_none()
            && self.status.is_none()
    }
}

/// Media to attach to a mod profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaAdditions {
    /// Replacement logo image, when the logo changed.
    pub logo: Option<Vec<u8>>,
    /// Net-new YouTube URLs.
    pub youtube_urls: Vec<String>,
    /// Net-new Sketchfab URLs.
    pub sketchfab_urls: Vec<String>,
    /// Archive of net-new gallery images, one file per image.
    pub gallery_archive: Option<Vec<u8>>,
}

impl MediaAdditions {
    /// Whether nothing would be added.
    pub fn is_empty(&self) -> bool {
        self.logo.is_none()
            && self.youtube_urls.is_empty()
            && self.sketchfab_urls.is_empty()
            && self.gallery_archive.is_none()
    }
}

/// Media to detach from a mod profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaRemovals {
    /// YouTube URLs no longer referenced.
    pub youtube_urls: Vec<String>,
    /// Sketchfab URLs no longer referenced.
    pub sketchfab_urls: Vec<String>,
    /// Filenames of gallery images to remove.
    pub gallery_file_names: Vec<String>,
}

impl MediaRemovals {
    /// Whether nothing would be removed.
    pub fn is_empty(&self) -> bool {
        self.youtube_urls.is_empty()
            && self.sketchfab_urls.is_empty()
            && self.gallery_file_names.is_empty()
    }
}
