//! Record types for the remote mod catalog.
//!
//! Everything the cache persists lives here: game and mod profiles, build
//! metadata, statistics, team and user records, events, and the media
//! description types. All records serialize with serde and are stored as
//! JSON by the cache layer.

mod events;
mod files;
mod game;
mod media;
mod mods;
mod stats;
mod user;

pub use events::{ModEvent, ModEventType, UserEvent, UserEventType};
pub use files::{Download, Modfile};
pub use game::{GameProfile, GameTagOption};
pub use media::{
    AvatarImageSet, AvatarSize, GalleryImage, GallerySize, ImageVersions, LogoImageSet, LogoSize,
    ModMedia,
};
pub use mods::{MetadataKvp, ModProfile, ModStatus, ModVisibility};
pub use stats::ModStatistics;
pub use user::{TeamLevel, TeamMember, UserProfile};

#[cfg(test)]
pub(crate) use mods::tests::sample_profile;

/// Sentinel id for resources not managed by the catalog.
///
/// Install directories that do not decode to a real `(mod, modfile)` pair
/// report this id, marking them as drop-in content the install lifecycle
/// must leave alone.
pub const NULL_ID: u32 = 0;
