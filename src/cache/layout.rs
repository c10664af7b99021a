//! Cache path construction.
//!
//! Every path under the cache root is derived here and nowhere else. Two
//! independently derived paths for the same logical resource are textually
//! identical because both go through the same method; components that walk
//! the tree (directory iteration, per-mod purge) rebuild paths through this
//! resolver rather than concatenating strings.

use std::path::{Path, PathBuf};

use crate::catalog::{AvatarSize, GallerySize, LogoSize};

/// Filename of a serialized record inside its resource directory.
const PROFILE_FILE: &str = "profile.data";
const STATS_FILE: &str = "stats.data";
const TEAM_FILE: &str = "team.data";
const VERSIONS_FILE: &str = "versions.data";
const GAME_PROFILE_FILE: &str = "game_profile.data";
const STATE_FILE: &str = "state.data";

/// Maps resource identities to paths under one cache root.
///
/// ```text
/// <root>/game_profile.data
/// <root>/state.data
/// <root>/mods/<modId>/profile.data
/// <root>/mods/<modId>/stats.data
/// <root>/mods/<modId>/team.data
/// <root>/mods/<modId>/binaries/<modfileId>.data
/// <root>/mods/<modId>/binaries/<modfileId>.zip
/// <root>/mods/<modId>/logo/<size>.png
/// <root>/mods/<modId>/logo/versions.data
/// <root>/mods/<modId>/mod_media/images/<size>/<fileName>
/// <root>/mods/<modId>/mod_media/youtube/<youTubeId>.png
/// <root>/users/<userId>/profile.data
/// <root>/users/<userId>/avatar/<size>.png
/// <root>/users/<userId>/avatar/versions.data
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    /// Create a resolver rooted at `root`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use modsync::cache::CacheLayout;
    ///
    /// let layout = CacheLayout::new("/cache");
    /// assert_eq!(layout.mod_profile_path(42), PathBuf::from("/cache/mods/42/profile.data"));
    /// ```
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cache root everything else is derived from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the cached game profile.
    pub fn game_profile_path(&self) -> PathBuf {
        self.root.join(GAME_PROFILE_FILE)
    }

    /// Path of the persisted manager state.
    pub fn state_path(&self) -> PathBuf {
        self.root.join(STATE_FILE)
    }

    /// Directory holding every cached mod.
    pub fn mods_dir(&self) -> PathBuf {
        self.root.join("mods")
    }

    /// Directory holding everything cached for one mod.
    pub fn mod_dir(&self, mod_id: u32) -> PathBuf {
        self.mods_dir().join(mod_id.to_string())
    }

    /// Path of a cached mod profile.
    pub fn mod_profile_path(&self, mod_id: u32) -> PathBuf {
        self.mod_dir(mod_id).join(PROFILE_FILE)
    }

    /// Filename profiles are stored under, for directory iteration.
    pub fn profile_file_name(&self) -> &'static str {
        PROFILE_FILE
    }

    /// Path of cached mod statistics.
    pub fn mod_stats_path(&self, mod_id: u32) -> PathBuf {
        self.mod_dir(mod_id).join(STATS_FILE)
    }

    /// Path of a cached mod team list.
    pub fn mod_team_path(&self, mod_id: u32) -> PathBuf {
        self.mod_dir(mod_id).join(TEAM_FILE)
    }

    /// Path of cached modfile metadata.
    ///
    /// # Example
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use modsync::cache::CacheLayout;
    ///
    /// let layout = CacheLayout::new("/cache");
    /// assert_eq!(
    ///     layout.modfile_meta_path(42, 900),
    ///     PathBuf::from("/cache/mods/42/binaries/900.data")
    /// );
    /// ```
    pub fn modfile_meta_path(&self, mod_id: u32, modfile_id: u32) -> PathBuf {
        self.mod_dir(mod_id)
            .join("binaries")
            .join(format!("{modfile_id}.data"))
    }

    /// Path of a cached build archive.
    pub fn mod_binary_path(&self, mod_id: u32, modfile_id: u32) -> PathBuf {
        self.mod_dir(mod_id)
            .join("binaries")
            .join(format!("{modfile_id}.zip"))
    }

    /// Directory holding cached logo renditions for a mod.
    pub fn logo_dir(&self, mod_id: u32) -> PathBuf {
        self.mod_dir(mod_id).join("logo")
    }

    /// Path of one cached logo rendition.
    pub fn logo_path(&self, mod_id: u32, size: LogoSize) -> PathBuf {
        self.logo_dir(mod_id).join(format!("{}.png", size.as_str()))
    }

    /// Path of the version record tracking which upload each cached logo
    /// rendition came from.
    pub fn logo_versions_path(&self, mod_id: u32) -> PathBuf {
        self.logo_dir(mod_id).join(VERSIONS_FILE)
    }

    /// Path of one cached gallery image rendition.
    pub fn gallery_image_path(&self, mod_id: u32, file_name: &str, size: GallerySize) -> PathBuf {
        self.mod_dir(mod_id)
            .join("mod_media")
            .join("images")
            .join(size.as_str())
            .join(file_name)
    }

    /// Path of a cached YouTube thumbnail.
    pub fn youtube_thumb_path(&self, mod_id: u32, youtube_id: &str) -> PathBuf {
        self.mod_dir(mod_id)
            .join("mod_media")
            .join("youtube")
            .join(format!("{youtube_id}.png"))
    }

    /// Directory holding every cached user.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Directory holding everything cached for one user.
    pub fn user_dir(&self, user_id: u32) -> PathBuf {
        self.users_dir().join(user_id.to_string())
    }

    /// Path of a cached user profile.
    pub fn user_profile_path(&self, user_id: u32) -> PathBuf {
        self.user_dir(user_id).join(PROFILE_FILE)
    }

    /// Directory holding cached avatar renditions for a user.
    pub fn avatar_dir(&self, user_id: u32) -> PathBuf {
        self.user_dir(user_id).join("avatar")
    }

    /// Path of one cached avatar rendition.
    pub fn avatar_path(&self, user_id: u32, size: AvatarSize) -> PathBuf {
        self.avatar_dir(user_id)
            .join(format!("{}.png", size.as_str()))
    }

    /// Path of the version record for a user's cached avatar renditions.
    pub fn avatar_versions_path(&self, user_id: u32) -> PathBuf {
        self.avatar_dir(user_id).join(VERSIONS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CacheLayout {
        CacheLayout::new("/cache")
    }

    #[test]
    fn test_root_level_paths() {
        assert_eq!(
            layout().game_profile_path(),
            PathBuf::from("/cache/game_profile.data")
        );
        assert_eq!(layout().state_path(), PathBuf::from("/cache/state.data"));
    }

    #[test]
    fn test_mod_record_paths() {
        assert_eq!(layout().mod_dir(42), PathBuf::from("/cache/mods/42"));
        assert_eq!(
            layout().mod_profile_path(42),
            PathBuf::from("/cache/mods/42/profile.data")
        );
        assert_eq!(
            layout().mod_stats_path(42),
            PathBuf::from("/cache/mods/42/stats.data")
        );
        assert_eq!(
            layout().mod_team_path(42),
            PathBuf::from("/cache/mods/42/team.data")
        );
    }

    #[test]
    fn test_binary_paths_share_directory() {
        let meta = layout().modfile_meta_path(42, 900);
        let binary = layout().mod_binary_path(42, 900);

        assert_eq!(meta, PathBuf::from("/cache/mods/42/binaries/900.data"));
        assert_eq!(binary, PathBuf::from("/cache/mods/42/binaries/900.zip"));
        assert_eq!(meta.parent(), binary.parent());
    }

    #[test]
    fn test_logo_paths() {
        assert_eq!(
            layout().logo_path(42, LogoSize::Original),
            PathBuf::from("/cache/mods/42/logo/original.png")
        );
        assert_eq!(
            layout().logo_path(42, LogoSize::Thumb640x360),
            PathBuf::from("/cache/mods/42/logo/640x360.png")
        );
        assert_eq!(
            layout().logo_versions_path(42),
            PathBuf::from("/cache/mods/42/logo/versions.data")
        );
    }

    #[test]
    fn test_gallery_image_path() {
        assert_eq!(
            layout().gallery_image_path(42, "shot1.png", GallerySize::Original),
            PathBuf::from("/cache/mods/42/mod_media/images/original/shot1.png")
        );
        assert_eq!(
            layout().gallery_image_path(42, "shot1.png", GallerySize::Thumb320x180),
            PathBuf::from("/cache/mods/42/mod_media/images/320x180/shot1.png")
        );
    }

    #[test]
    fn test_youtube_thumb_path() {
        assert_eq!(
            layout().youtube_thumb_path(42, "dQw4w9WgXcQ"),
            PathBuf::from("/cache/mods/42/mod_media/youtube/dQw4w9WgXcQ.png")
        );
    }

    #[test]
    fn test_user_paths() {
        assert_eq!(
            layout().user_profile_path(17),
            PathBuf::from("/cache/users/17/profile.data")
        );
        assert_eq!(
            layout().avatar_path(17, AvatarSize::Thumb100x100),
            PathBuf::from("/cache/users/17/avatar/100x100.png")
        );
        assert_eq!(
            layout().avatar_versions_path(17),
            PathBuf::from("/cache/users/17/avatar/versions.data")
        );
    }

    #[test]
    fn test_mod_paths_live_under_mod_dir() {
        let layout = layout();
        let dir = layout.mod_dir(42);

        assert!(layout.mod_profile_path(42).starts_with(&dir));
        assert!(layout.mod_stats_path(42).starts_with(&dir));
        assert!(layout.mod_team_path(42).starts_with(&dir));
        assert!(layout.mod_binary_path(42, 900).starts_with(&dir));
        assert!(layout.logo_path(42, LogoSize::Original).starts_with(&dir));
        assert!(layout
            .gallery_image_path(42, "a.png", GallerySize::Original)
            .starts_with(&dir));
        assert!(layout.youtube_thumb_path(42, "abc").starts_with(&dir));
    }

    #[test]
    fn test_rederived_paths_are_identical() {
        // Directory enumeration by id and direct construction must agree.
        let layout = layout();
        for mod_id in [1, 42, 4_294_967_295] {
            let via_dir = layout.mod_dir(mod_id).join("profile.data");
            assert_eq!(via_dir, layout.mod_profile_path(mod_id));
        }
        for user_id in [1, 17] {
            let via_dir = layout.user_dir(user_id).join("profile.data");
            assert_eq!(via_dir, layout.user_profile_path(user_id));
        }
    }

    #[test]
    fn test_distinct_mods_never_collide() {
        let layout = layout();
        assert_ne!(layout.mod_dir(1), layout.mod_dir(11));
        assert_ne!(layout.mod_profile_path(1), layout.mod_profile_path(2));
        assert_ne!(layout.mod_binary_path(1, 2), layout.mod_binary_path(2, 1));
    }
}
