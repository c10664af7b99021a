//! Event records used to poll for remote changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What changed about a mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModEventType {
    /// A new build became the current modfile.
    ModfileChanged,
    /// The mod became visible/accepted.
    ModAvailable,
    /// The mod was hidden or deleted.
    ModUnavailable,
    /// Profile fields were edited.
    ModEdited,
    /// Team membership changed.
    ModTeamChanged,
}

/// One entry in a mod's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModEvent {
    /// Event id, strictly increasing per mod.
    pub id: u32,
    /// Mod the event concerns.
    pub mod_id: u32,
    /// User who caused the event.
    pub user_id: u32,
    /// When the event occurred.
    pub date_added: DateTime<Utc>,
    /// What happened.
    pub event_type: ModEventType,
}

/// What changed about the authenticated user's relationship to a mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserEventType {
    /// Joined a mod team.
    TeamJoin,
    /// Left a mod team.
    TeamLeave,
    /// Subscribed to a mod.
    Subscribe,
    /// Unsubscribed from a mod.
    Unsubscribe,
}

/// One entry in the authenticated user's event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    /// Event id, strictly increasing per user.
    pub id: u32,
    /// Game scope of the event.
    pub game_id: u32,
    /// Mod the event concerns.
    pub mod_id: u32,
    /// The user.
    pub user_id: u32,
    /// When the event occurred.
    pub date_added: DateTime<Utc>,
    /// What happened.
    pub event_type: UserEventType,
}
