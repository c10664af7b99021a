//! Game profile record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tag category a game makes available to its mods.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameTagOption {
    /// Category name shown to users (e.g. "Theme").
    pub name: String,
    /// Whether mods may pick several tags from this category.
    pub multi_select: bool,
    /// Tags belonging to the category.
    pub tags: Vec<String>,
    /// Hidden categories are usable through the API but not browsable.
    pub hidden: bool,
}

/// Profile of the game a cache root is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProfile {
    /// Catalog id of the game.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Short description shown in listings.
    pub summary: String,
    /// Word the game uses for its user-generated content ("mods", "maps", ...).
    pub ugc_name: String,
    /// URL of the game's modding instructions, empty when none published.
    pub instructions_url: String,
    /// When the game was registered with the catalog.
    pub date_added: DateTime<Utc>,
    /// When the profile last changed.
    pub date_updated: DateTime<Utc>,
    /// Tag categories available to this game's mods.
    pub tag_options: Vec<GameTagOption>,
}
