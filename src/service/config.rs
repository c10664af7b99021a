//! Service configuration.

use std::path::PathBuf;

/// Default page size for listing endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for [`ModSyncService`](super::ModSyncService).
///
/// # Example
///
/// ```
/// use modsync::service::ServiceConfig;
///
/// let config = ServiceConfig::new(51)
///     .with_cache_dir("/tmp/modsync-cache")
///     .with_install_dir("/tmp/modsync-mods")
///     .with_page_size(50);
///
/// assert_eq!(config.game_id, 51);
/// assert_eq!(config.page_size, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Game whose mod catalog this service works against.
    pub game_id: u32,
    /// Root directory of the object cache.
    pub cache_dir: PathBuf,
    /// Directory installed mod content is extracted into.
    pub install_dir: PathBuf,
    /// Page size used by listing cascades.
    pub page_size: u32,
    /// Delete cached archives once their content is installed.
    pub reclaim_archives: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            game_id: 0,
            cache_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("modsync"),
            install_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("modsync")
                .join("mods"),
            page_size: DEFAULT_PAGE_SIZE,
            reclaim_archives: false,
        }
    }
}

impl ServiceConfig {
    /// Configuration for one game with platform-default directories.
    pub fn new(game_id: u32) -> Self {
        Self {
            game_id,
            ..Self::default()
        }
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    /// Set the listing page size. Clamped to at least one, since a zero
    /// page size could never finish a cascade.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_reclaim_archives(mut self, reclaim: bool) -> Self {
        self.reclaim_archives = reclaim;
        self
    }
}
