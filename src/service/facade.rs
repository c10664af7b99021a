//! The `ModSyncService` facade.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task;
use tracing::debug;

use super::config::ServiceConfig;
use super::error::ServiceError;
use crate::archive::{ArchiveCodec, ZipArchiver};
use crate::cache::{CacheLayout, CacheStats, CacheStore};
use crate::catalog::{
    AvatarSize, GallerySize, GameProfile, LogoSize, ModEvent, ModProfile, ModStatistics, Modfile,
    TeamMember, UserEvent, UserProfile, NULL_ID,
};
use crate::client::{CatalogClient, CatalogEditor, ModQuery};
use crate::fetch::{
    fetch_all, get_or_fetch, get_or_fetch_binary, get_or_fetch_versioned_image, get_or_fetch_where,
};
use crate::manager::{InstallManager, InstallOptions, InstalledMod, ManagerState};
use crate::storage::{DynStorage, LocalStorage};
use crate::submit::{submit, ModEdit};

/// High-level facade over the whole SDK.
///
/// Wires the cache, install manager, and persistent subscription state
/// around a wire client, so callers get write-through catalog access
/// without assembling the components themselves.
///
/// # Example
///
/// ```ignore
/// use modsync::client::ModQuery;
/// use modsync::service::{ModSyncService, ServiceConfig};
///
/// let service = ModSyncService::new(client, ServiceConfig::new(51));
///
/// let profile = service.get_or_fetch_mod_profile(1203).await?;
/// let catalog = service.fetch_all_mods(&ModQuery::new(51)).await?;
/// ```
pub struct ModSyncService<C> {
    /// Wire client for the remote catalog.
    client: C,
    config: ServiceConfig,
    store: CacheStore,
    layout: CacheLayout,
    archiver: Arc<dyn ArchiveCodec>,
    /// Shared so install work can move onto blocking threads.
    installs: Arc<InstallManager>,
    /// Subscriptions and enablement, persisted after every change.
    state: Mutex<ManagerState>,
}

impl<C: CatalogClient> ModSyncService<C> {
    /// Create a service over the local file system and zip archives.
    pub fn new(client: C, config: ServiceConfig) -> Self {
        Self::with_parts(
            client,
            config,
            Arc::new(LocalStorage::new()),
            Arc::new(ZipArchiver::new()),
        )
    }

    /// Create a service with explicit storage and archive collaborators.
    pub fn with_parts(
        client: C,
        config: ServiceConfig,
        storage: DynStorage,
        archiver: Arc<dyn ArchiveCodec>,
    ) -> Self {
        let layout = CacheLayout::new(&config.cache_dir);
        let store = CacheStore::new(Arc::clone(&storage));
        let installs = Arc::new(InstallManager::new(
            &config.install_dir,
            storage,
            store.clone(),
            layout.clone(),
            Arc::clone(&archiver),
            InstallOptions {
                reclaim_archives: config.reclaim_archives,
            },
        ));
        let state = Mutex::new(ManagerState::load_or_default(&store, &layout));
        Self {
            client,
            config,
            store,
            layout,
            archiver,
            installs,
            state,
        }
    }

    /// Profile of the configured game, cached indefinitely.
    pub async fn get_or_fetch_game_profile(&self) -> Result<GameProfile, ServiceError> {
        let path = self.layout.game_profile_path();
        let game_id = self.config.game_id;
        let profile = get_or_fetch(&self.store, &path, || self.client.game_profile(game_id)).await?;
        Ok(profile)
    }

    /// Profile of one mod, cached indefinitely.
    pub async fn get_or_fetch_mod_profile(&self, mod_id: u32) -> Result<ModProfile, ServiceError> {
        let path = self.layout.mod_profile_path(mod_id);
        let profile = get_or_fetch(&self.store, &path, || self.client.mod_profile(mod_id)).await?;
        Ok(profile)
    }

    /// Statistics for one mod, re-fetched once the cached record expires.
    pub async fn get_or_fetch_mod_statistics(
        &self,
        mod_id: u32,
    ) -> Result<ModStatistics, ServiceError> {
        let path = self.layout.mod_stats_path(mod_id);
        let stats = get_or_fetch_where(
            &self.store,
            &path,
            |stats: &ModStatistics| stats.is_fresh(Utc::now()),
            || self.client.mod_statistics(mod_id),
        )
        .await?;
        Ok(stats)
    }

    /// Metadata for one build of a mod, cached indefinitely.
    pub async fn get_or_fetch_modfile(
        &self,
        mod_id: u32,
        modfile_id: u32,
    ) -> Result<Modfile, ServiceError> {
        let path = self.layout.modfile_meta_path(mod_id, modfile_id);
        let modfile = get_or_fetch(&self.store, &path, || {
            self.client.modfile(mod_id, modfile_id)
        })
        .await?;
        Ok(modfile)
    }

    /// Team roster of a mod, cached indefinitely.
    pub async fn get_or_fetch_mod_team(&self, mod_id: u32) -> Result<Vec<TeamMember>, ServiceError> {
        let path = self.layout.mod_team_path(mod_id);
        let team = get_or_fetch(&self.store, &path, || self.client.mod_team(mod_id)).await?;
        Ok(team)
    }

    /// Profile of one user, cached indefinitely.
    pub async fn get_or_fetch_user(&self, user_id: u32) -> Result<UserProfile, ServiceError> {
        let path = self.layout.user_profile_path(user_id);
        let user = get_or_fetch(&self.store, &path, || self.client.user_profile(user_id)).await?;
        Ok(user)
    }

    /// One rendition of a mod's logo.
    ///
    /// The cached image is keyed by the upload it was derived from, so a
    /// logo replaced on the server is re-fetched even though the rendition
    /// path is unchanged.
    pub async fn get_or_fetch_mod_logo(
        &self,
        mod_id: u32,
        size: LogoSize,
    ) -> Result<Vec<u8>, ServiceError> {
        let profile = self.get_or_fetch_mod_profile(mod_id).await?;
        let url = profile.logo.url_for(size).to_string();
        let image_path = self.layout.logo_path(mod_id, size);
        let versions_path = self.layout.logo_versions_path(mod_id);
        let bytes = get_or_fetch_versioned_image(
            &self.store,
            &image_path,
            &versions_path,
            size.as_str(),
            &profile.logo.file_name,
            || self.client.download(&url),
        )
        .await?;
        Ok(bytes)
    }

    /// One rendition of a user's avatar, keyed by upload like logos.
    pub async fn get_or_fetch_user_avatar(
        &self,
        user_id: u32,
        size: AvatarSize,
    ) -> Result<Vec<u8>, ServiceError> {
        let profile = self.get_or_fetch_user(user_id).await?;
        let url = profile.avatar.url_for(size).to_string();
        let image_path = self.layout.avatar_path(user_id, size);
        let versions_path = self.layout.avatar_versions_path(user_id);
        let bytes = get_or_fetch_versioned_image(
            &self.store,
            &image_path,
            &versions_path,
            size.as_str(),
            &profile.avatar.file_name,
            || self.client.download(&url),
        )
        .await?;
        Ok(bytes)
    }

    /// One rendition of a gallery image named on the mod's profile.
    ///
    /// Gallery uploads get fresh server-side file names, so the name alone
    /// identifies the content and the plain binary cache suffices.
    pub async fn get_or_fetch_gallery_image(
        &self,
        mod_id: u32,
        file_name: &str,
        size: GallerySize,
    ) -> Result<Vec<u8>, ServiceError> {
        let profile = self.get_or_fetch_mod_profile(mod_id).await?;
        let image = profile
            .media
            .gallery_images
            .iter()
            .find(|image| image.file_name == file_name)
            .ok_or_else(|| ServiceError::UnknownMedia {
                mod_id,
                name: file_name.to_string(),
            })?;
        let url = image.url_for(size).to_string();
        let path = self.layout.gallery_image_path(mod_id, file_name, size);
        let bytes = get_or_fetch_binary(&self.store, &path, || self.client.download(&url)).await?;
        Ok(bytes)
    }

    /// Thumbnail for a YouTube video listed on the mod's profile.
    pub async fn get_or_fetch_youtube_thumb(
        &self,
        mod_id: u32,
        url: &str,
    ) -> Result<Vec<u8>, ServiceError> {
        let profile = self.get_or_fetch_mod_profile(mod_id).await?;
        if !profile.media.youtube_urls.iter().any(|listed| listed == url) {
            return Err(ServiceError::UnknownMedia {
                mod_id,
                name: url.to_string(),
            });
        }
        let video_id = youtube_video_id(url).ok_or_else(|| ServiceError::UnknownMedia {
            mod_id,
            name: url.to_string(),
        })?;
        let thumb_url = format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg");
        let path = self.layout.youtube_thumb_path(mod_id, video_id);
        let bytes =
            get_or_fetch_binary(&self.store, &path, || self.client.download(&thumb_url)).await?;
        Ok(bytes)
    }

    /// Every mod matching `query`, gathered across pages.
    ///
    /// Each returned profile is written through to the cache, so a catalog
    /// sweep warms subsequent per-mod lookups.
    pub async fn fetch_all_mods(&self, query: &ModQuery) -> Result<Vec<ModProfile>, ServiceError> {
        let client = &self.client;
        let profiles = fetch_all(self.config.page_size, move |offset, limit| {
            client.mods(query, offset, limit)
        })
        .await?;
        for profile in &profiles {
            self.store
                .save(&self.layout.mod_profile_path(profile.id), profile);
        }
        Ok(profiles)
    }

    /// The full event log of one mod, oldest page first.
    pub async fn fetch_all_mod_events(&self, mod_id: u32) -> Result<Vec<ModEvent>, ServiceError> {
        let client = &self.client;
        let events = fetch_all(self.config.page_size, move |offset, limit| {
            client.mod_events(mod_id, offset, limit)
        })
        .await?;
        Ok(events)
    }

    /// The authenticated user's full event log.
    pub async fn fetch_all_user_events(&self) -> Result<Vec<UserEvent>, ServiceError> {
        let client = &self.client;
        let events = fetch_all(self.config.page_size, move |offset, limit| {
            client.user_events(offset, limit)
        })
        .await?;
        Ok(events)
    }

    /// Current profiles of every subscribed mod, written through the cache.
    pub async fn fetch_all_subscribed_profiles(&self) -> Result<Vec<ModProfile>, ServiceError> {
        let ids: Vec<u32> = {
            let state = self.state.lock().unwrap();
            state.subscribed.iter().copied().collect()
        };
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = ModQuery::new(self.config.game_id).with_ids(ids);
        self.fetch_all_mods(&query).await
    }

    /// Download a mod's archive into the cache, returning its bytes.
    ///
    /// The modfile metadata is fetched first for its download URL. The
    /// cached archive is what [`install`](Self::install) extracts from.
    pub async fn fetch_mod_binary(
        &self,
        mod_id: u32,
        modfile_id: u32,
    ) -> Result<Vec<u8>, ServiceError> {
        let modfile = self.get_or_fetch_modfile(mod_id, modfile_id).await?;
        let url = modfile.download.binary_url;
        let path = self.layout.mod_binary_path(mod_id, modfile_id);
        let bytes = get_or_fetch_binary(&self.store, &path, || self.client.download(&url)).await?;
        Ok(bytes)
    }

    /// Install a cached archive, replacing any other installed version.
    ///
    /// Extraction runs on a blocking thread; the async caller only waits.
    pub async fn install(&self, mod_id: u32, modfile_id: u32) -> Result<InstalledMod, ServiceError> {
        let installs = Arc::clone(&self.installs);
        let installed = task::spawn_blocking(move || installs.install(mod_id, modfile_id))
            .await
            .map_err(|err| ServiceError::TaskJoin(err.to_string()))?;
        Ok(installed?)
    }

    /// Remove every installed version of a mod.
    pub async fn uninstall(&self, mod_id: u32) -> Result<(), ServiceError> {
        let installs = Arc::clone(&self.installs);
        let result = task::spawn_blocking(move || installs.uninstall(mod_id))
            .await
            .map_err(|err| ServiceError::TaskJoin(err.to_string()))?;
        Ok(result?)
    }

    /// Remove one installed version, leaving others untouched.
    pub async fn uninstall_version(
        &self,
        mod_id: u32,
        modfile_id: u32,
    ) -> Result<(), ServiceError> {
        let installs = Arc::clone(&self.installs);
        let result = task::spawn_blocking(move || installs.uninstall_version(mod_id, modfile_id))
            .await
            .map_err(|err| ServiceError::TaskJoin(err.to_string()))?;
        Ok(result?)
    }

    /// Everything currently installed under the install root.
    pub fn installed_mods(&self) -> Vec<InstalledMod> {
        self.installs.list(None)
    }

    /// Directories the game should load mod content from.
    ///
    /// With `exclude_disabled` set, only enabled mods are listed; drop-in
    /// directories placed by hand are always kept since nothing manages
    /// their state.
    pub fn installed_mod_directories(&self, exclude_disabled: bool) -> Vec<PathBuf> {
        if !exclude_disabled {
            return self
                .installs
                .list(None)
                .into_iter()
                .map(|installed| installed.path)
                .collect();
        }
        let mut wanted: HashSet<u32> = {
            let state = self.state.lock().unwrap();
            state.enabled.iter().copied().collect()
        };
        wanted.insert(NULL_ID);
        self.installs
            .list(Some(&wanted))
            .into_iter()
            .map(|installed| installed.path)
            .collect()
    }

    /// Mark a subscribed mod's installed content as loadable.
    ///
    /// Returns false for mods the user is not subscribed to.
    pub fn enable_mod(&self, mod_id: u32) -> bool {
        let mut state = self.state.lock().unwrap();
        let changed = state.enable(mod_id);
        if changed {
            state.persist(&self.store, &self.layout);
        }
        changed
    }

    /// Stop loading a mod's content while keeping the subscription.
    pub fn disable_mod(&self, mod_id: u32) -> bool {
        let mut state = self.state.lock().unwrap();
        let changed = state.disable(mod_id);
        if changed {
            state.persist(&self.store, &self.layout);
        }
        changed
    }

    /// Ids of every subscribed mod, ascending.
    pub fn subscribed_mods(&self) -> Vec<u32> {
        let state = self.state.lock().unwrap();
        state.subscribed.iter().copied().collect()
    }

    /// Ids of every enabled mod, ascending.
    pub fn enabled_mods(&self) -> Vec<u32> {
        let state = self.state.lock().unwrap();
        state.enabled.iter().copied().collect()
    }

    /// Drop every cached record and binary belonging to one mod.
    pub fn uncache_mod(&self, mod_id: u32) -> bool {
        debug!(mod_id, "purging cached mod data");
        self.store.delete_tree(&self.layout.mod_dir(mod_id))
    }

    /// Every mod profile currently in the cache. Unreadable records are
    /// skipped and healed by the cache layer.
    pub fn cached_mod_profiles(&self) -> impl Iterator<Item = ModProfile> + '_ {
        self.store
            .iter_subdir_records(&self.layout.mods_dir(), self.layout.profile_file_name())
    }

    /// The configuration this service was built from.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Counters for cache effectiveness since startup.
    pub fn cache_stats(&self) -> CacheStats {
        self.store.stats()
    }
}

impl<C: CatalogEditor> ModSyncService<C> {
    /// Push buffered profile edits to the server.
    ///
    /// Steps run in dependency order and stop at the first failure. The
    /// canonical profile is re-fetched and cached afterwards whenever the
    /// server is still reachable.
    pub async fn submit_mod_changes(
        &self,
        mod_id: u32,
        edit: &ModEdit,
    ) -> Result<ModProfile, ServiceError> {
        let profile = submit(
            &self.client,
            &self.store,
            &self.layout,
            self.archiver.as_ref(),
            mod_id,
            edit,
        )
        .await?;
        Ok(profile)
    }

    /// Subscribe to a mod and record it locally. New subscriptions start
    /// enabled.
    pub async fn subscribe(&self, mod_id: u32) -> Result<ModProfile, ServiceError> {
        let profile = self.client.subscribe(mod_id).await?;
        self.store
            .save(&self.layout.mod_profile_path(profile.id), &profile);
        let mut state = self.state.lock().unwrap();
        if state.subscribe(mod_id) {
            state.persist(&self.store, &self.layout);
        }
        Ok(profile)
    }

    /// Unsubscribe from a mod, dropping its enablement with it.
    pub async fn unsubscribe(&self, mod_id: u32) -> Result<(), ServiceError> {
        self.client.unsubscribe(mod_id).await?;
        let mut state = self.state.lock().unwrap();
        if state.unsubscribe(mod_id) {
            state.persist(&self.store, &self.layout);
        }
        Ok(())
    }
}

/// Extract the video id from the YouTube URL forms the catalog accepts.
fn youtube_video_id(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);

    if let Some(tail) = rest.strip_prefix("youtu.be/") {
        return first_path_segment(tail);
    }
    if let Some(tail) = rest.strip_prefix("youtube.com/embed/") {
        return first_path_segment(tail);
    }
    if let Some((_, query)) = rest.split_once('?') {
        for pair in query.split('&') {
            if let Some(id) = pair.strip_prefix("v=") {
                return first_path_segment(id);
            }
        }
    }
    None
}

fn first_path_segment(tail: &str) -> Option<&str> {
    let id = tail
        .split(|c| c == '?' || c == '&' || c == '/')
        .next()
        .unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
