//! Mod profile record and its component types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::files::Modfile;
use super::media::{LogoImageSet, ModMedia};
use super::user::UserProfile;

/// Moderation status of a mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModStatus {
    /// Awaiting moderator acceptance, visible only to its team.
    NotAccepted,
    /// Accepted into the catalog.
    Accepted,
    /// Soft-deleted by its team or a moderator.
    Deleted,
}

impl fmt::Display for ModStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModStatus::NotAccepted => write!(f, "not accepted"),
            ModStatus::Accepted => write!(f, "accepted"),
            ModStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// Whether the mod appears in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModVisibility {
    /// Reachable only by direct link or team members.
    Hidden,
    /// Browsable by everyone.
    Public,
}

impl fmt::Display for ModVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModVisibility::Hidden => write!(f, "hidden"),
            ModVisibility::Public => write!(f, "public"),
        }
    }
}

/// One searchable key-value pair attached to a mod.
///
/// Pairs are compared by key *and* value: changing the value of an existing
/// key is a removal of the old pair plus an addition of the new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataKvp {
    pub key: String,
    pub value: String,
}

impl MetadataKvp {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Server-side metadata record describing one mod.
///
/// String fields the author has not filled in are empty rather than absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModProfile {
    /// Catalog id of the mod.
    pub id: u32,
    /// Game the mod belongs to.
    pub game_id: u32,
    /// Moderation status.
    pub status: ModStatus,
    /// Listing visibility.
    pub visibility: ModVisibility,
    /// User who registered the mod.
    pub submitted_by: UserProfile,
    /// When the mod was registered.
    pub date_added: DateTime<Utc>,
    /// When the profile last changed.
    pub date_updated: DateTime<Utc>,
    /// When the mod became publicly visible.
    pub date_live: DateTime<Utc>,
    /// Display name.
    pub name: String,
    /// URL-safe handle derived from the name.
    pub name_id: String,
    /// One-paragraph summary.
    pub summary: String,
    /// Full HTML description, empty when unset.
    pub description: String,
    /// External homepage, empty when unset.
    pub homepage_url: String,
    /// Opaque developer-defined payload, empty when unset.
    pub metadata_blob: String,
    /// Logo renditions.
    pub logo: LogoImageSet,
    /// Attached media.
    pub media: ModMedia,
    /// Tag names applied to the mod.
    pub tags: Vec<String>,
    /// Searchable key-value pairs.
    pub metadata_kvps: Vec<MetadataKvp>,
    /// The current build, `None` while no build has been uploaded.
    pub modfile: Option<Modfile>,
}
