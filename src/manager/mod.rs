//! Install and subscription management for mod content.
//!
//! # Overview
//!
//! The manager side of the SDK covers everything that happens after a mod
//! archive lands in the cache:
//!
//! - Installing archives into versioned directories, one version per mod
//! - Enumerating installed content, including unmanaged drop-ins
//! - Persisting subscriptions and per-mod enablement across sessions
//!
//! Install directories are named by [`install_dir_name`] and decoded by
//! [`parse_install_dir_name`]; both the installer and the enumerator go
//! through this one pair so they can never disagree about ownership.

mod dirname;
mod installs;
mod state;

pub use dirname::{install_dir_name, parse_install_dir_name};
pub use installs::{InstallError, InstallManager, InstallOptions, InstalledMod};
pub use state::ManagerState;
