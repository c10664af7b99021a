//! Remote collaborator traits.
//!
//! The SDK consumes these and never implements them; a wire client crate
//! supplies the HTTP plumbing. Both traits use non-blocking futures so the
//! SDK's orchestration can await them without tying up threads.

use std::future::Future;

use super::types::{ClientError, MediaAdditions, MediaRemovals, ModQuery, Page, ProfileChanges};
use crate::catalog::{
    GameProfile, MetadataKvp, ModEvent, ModProfile, ModStatistics, Modfile, TeamMember, UserEvent,
    UserProfile,
};

/// Read access to the remote catalog.
pub trait CatalogClient: Send + Sync {
    /// Fetch a game profile.
    fn game_profile(
        &self,
        game_id: u32,
    ) -> impl Future<Output = Result<GameProfile, ClientError>> + Send;

    /// Fetch a mod profile.
    fn mod_profile(
        &self,
        mod_id: u32,
    ) -> impl Future<Output = Result<ModProfile, ClientError>> + Send;

    /// Fetch current statistics for a mod.
    fn mod_statistics(
        &self,
        mod_id: u32,
    ) -> impl Future<Output = Result<ModStatistics, ClientError>> + Send;

    /// Fetch metadata for one build of a mod.
    fn modfile(
        &self,
        mod_id: u32,
        modfile_id: u32,
    ) -> impl Future<Output = Result<Modfile, ClientError>> + Send;

    /// Fetch the team behind a mod.
    fn mod_team(
        &self,
        mod_id: u32,
    ) -> impl Future<Output = Result<Vec<TeamMember>, ClientError>> + Send;

    /// Fetch a user profile.
    fn user_profile(
        &self,
        user_id: u32,
    ) -> impl Future<Output = Result<UserProfile, ClientError>> + Send;

    /// Fetch one page of mods matching a query.
    fn mods(
        &self,
        query: &ModQuery,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<ModProfile>, ClientError>> + Send;

    /// Fetch one page of a mod's event log.
    fn mod_events(
        &self,
        mod_id: u32,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<ModEvent>, ClientError>> + Send;

    /// Fetch one page of the authenticated user's event log.
    fn user_events(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Page<UserEvent>, ClientError>> + Send;

    /// Fetch raw bytes from a catalog-issued URL (binaries, images).
    fn download(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ClientError>> + Send;
}

/// Mutation access to the remote catalog, for callers acting on behalf of
/// an authenticated user.
pub trait CatalogEditor: CatalogClient {
    /// Change scalar profile fields.
    fn edit_mod_profile(
        &self,
        mod_id: u32,
        changes: &ProfileChanges,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Attach media to a mod profile.
    fn add_mod_media(
        &self,
        mod_id: u32,
        additions: &MediaAdditions,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Detach media from a mod profile.
    fn delete_mod_media(
        &self,
        mod_id: u32,
        removals: &MediaRemovals,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Apply tags to a mod.
    fn add_mod_tags(
        &self,
        mod_id: u32,
        tags: &[String],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Remove tags from a mod.
    fn delete_mod_tags(
        &self,
        mod_id: u32,
        tags: &[String],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Attach metadata key-value pairs to a mod.
    fn add_mod_kvps(
        &self,
        mod_id: u32,
        kvps: &[MetadataKvp],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Remove metadata key-value pairs from a mod.
    fn delete_mod_kvps(
        &self,
        mod_id: u32,
        kvps: &[MetadataKvp],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Subscribe the authenticated user to a mod. Returns the mod's
    /// current profile.
    fn subscribe(
        &self,
        mod_id: u32,
    ) -> impl Future<Output = Result<ModProfile, ClientError>> + Send;

    /// Unsubscribe the authenticated user from a mod.
    fn unsubscribe(&self, mod_id: u32) -> impl Future<Output = Result<(), ClientError>> + Send;
}
