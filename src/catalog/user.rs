//! User and team records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::media::AvatarImageSet;

/// Public profile of a catalog user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Catalog id of the user.
    pub id: u32,
    /// URL-safe handle.
    pub name_id: String,
    /// Display name.
    pub username: String,
    /// Last time the user was seen online.
    pub date_online: DateTime<Utc>,
    /// Avatar renditions.
    pub avatar: AvatarImageSet,
}

/// Access level of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamLevel {
    /// May moderate comments and content.
    Moderator,
    /// May manage the mod profile, media, and files.
    Manager,
    /// Full control, including team membership.
    Administrator,
}

impl fmt::Display for TeamLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamLevel::Moderator => write!(f, "moderator"),
            TeamLevel::Manager => write!(f, "manager"),
            TeamLevel::Administrator => write!(f, "administrator"),
        }
    }
}

/// One member of a mod's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Id of the membership record, not the user.
    pub id: u32,
    /// The member's user profile.
    pub user: UserProfile,
    /// Access level.
    pub level: TeamLevel,
    /// Free-form role title, empty when unset.
    pub position: String,
    /// When the member joined the team.
    pub date_added: DateTime<Utc>,
}
