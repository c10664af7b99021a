//! Persistent subscription and enablement state.
//!
//! The state record lives at [`CacheLayout::state_path`] and is rewritten
//! after every mutation. It carries the crate version that wrote it so old
//! records can be migrated in place when the format grows.

use std::collections::BTreeSet;

use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cache::{CacheLayout, CacheStore};

/// Subscriptions and per-mod enablement, persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerState {
    /// Crate version that last wrote this record.
    pub version: Version,
    /// Mod ids the user is subscribed to.
    #[serde(default)]
    pub subscribed: BTreeSet<u32>,
    /// Subscribed mods whose installed content should be loaded.
    #[serde(default)]
    pub enabled: BTreeSet<u32>,
}

impl Default for ManagerState {
    fn default() -> Self {
        Self {
            version: crate_version(),
            subscribed: BTreeSet::new(),
            enabled: BTreeSet::new(),
        }
    }
}

impl ManagerState {
    /// Load the persisted state, migrating old records forward.
    ///
    /// An absent or corrupt record yields the default state; corruption is
    /// healed by the cache layer. A migrated record is written back
    /// immediately.
    pub fn load_or_default(store: &CacheStore, layout: &CacheLayout) -> Self {
        let mut state: ManagerState = store.load(&layout.state_path()).unwrap_or_default();
        if state.migrate() {
            store.save(&layout.state_path(), &state);
        }
        state
    }

    /// Write the state record back to the cache.
    pub fn persist(&self, store: &CacheStore, layout: &CacheLayout) -> bool {
        store.save(&layout.state_path(), self)
    }

    /// Step the record forward to the current crate version.
    ///
    /// Returns true when the record changed and should be rewritten.
    /// Running this on a current record is a no-op, so loading twice is
    /// safe.
    pub fn migrate(&mut self) -> bool {
        let current = crate_version();
        if self.version >= current {
            return false;
        }

        // Records from before 0.2.0 predate enablement tracking; every
        // subscribed mod was implicitly enabled.
        if self.version < Version::new(0, 2, 0) && self.enabled.is_empty() {
            self.enabled = self.subscribed.clone();
        }

        info!(from = %self.version, to = %current, "migrated manager state");
        self.version = current;
        true
    }

    /// Record a subscription. New subscriptions start enabled.
    pub fn subscribe(&mut self, mod_id: u32) -> bool {
        let added = self.subscribed.insert(mod_id);
        if added {
            self.enabled.insert(mod_id);
        }
        added
    }

    /// Drop a subscription and its enablement.
    pub fn unsubscribe(&mut self, mod_id: u32) -> bool {
        self.enabled.remove(&mod_id);
        self.subscribed.remove(&mod_id)
    }

    /// Mark a subscribed mod's content as loadable. Unsubscribed ids are
    /// refused.
    pub fn enable(&mut self, mod_id: u32) -> bool {
        self.subscribed.contains(&mod_id) && self.enabled.insert(mod_id)
    }

    /// Keep the subscription but stop loading its content.
    pub fn disable(&mut self, mod_id: u32) -> bool {
        self.enabled.remove(&mod_id)
    }

    pub fn is_subscribed(&self, mod_id: u32) -> bool {
        self.subscribed.contains(&mod_id)
    }

    pub fn is_enabled(&self, mod_id: u32) -> bool {
        self.enabled.contains(&mod_id)
    }
}

fn crate_version() -> Version {
    Version::parse(crate::VERSION).unwrap_or_else(|_| Version::new(0, 0, 0))
}
