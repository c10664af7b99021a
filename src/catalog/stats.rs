//! Mod statistics record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated statistics for one mod.
///
/// Statistics are recomputed server-side on a schedule, so each record
/// carries the timestamp after which it should no longer be trusted. The
/// cache layer treats an expired record as a miss without deleting it; the
/// stale copy is simply overwritten by the next successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModStatistics {
    /// Mod the statistics describe.
    pub mod_id: u32,
    /// Rank within the game by popularity, 1 is best.
    pub popularity_rank: u32,
    /// Number of mods ranked.
    pub popularity_total: u32,
    /// Lifetime downloads.
    pub downloads_total: u32,
    /// Current subscriber count.
    pub subscribers_total: u32,
    /// Number of ratings submitted.
    pub ratings_total: u32,
    /// Positive ratings.
    pub ratings_positive: u32,
    /// Negative ratings.
    pub ratings_negative: u32,
    /// Positive share as a whole percentage.
    pub ratings_percentage: u32,
    /// Bayesian-weighted aggregate score.
    pub ratings_weighted: f64,
    /// Server-rendered summary, e.g. "Very Positive".
    pub ratings_display_text: String,
    /// When this record stops being fresh.
    pub date_expires: DateTime<Utc>,
}

impl ModStatistics {
    /// Whether the record is still fresh at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.date_expires > now
    }
}
