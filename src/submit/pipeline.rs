//! Sequential execution of a submission plan.

use tracing::{debug, info, warn};

use crate::archive::ArchiveCodec;
use crate::cache::{CacheLayout, CacheStore};
use crate::catalog::ModProfile;
use crate::client::CatalogEditor;

use super::plan::{build_plan, SubmissionStep};
use super::{ModEdit, SubmitError};

/// Submit a buffered edit to the remote catalog.
///
/// The baseline for the diff is the cached profile, fetched and written
/// through when not cached yet. Steps run strictly in plan order; the
/// first failure aborts the remainder and leaves the cache untouched.
/// After a complete run the canonical profile is re-fetched, cached, and
/// returned, since the server recomputes derived fields the SDK cannot.
pub async fn submit<C: CatalogEditor>(
    client: &C,
    store: &CacheStore,
    layout: &CacheLayout,
    archiver: &dyn ArchiveCodec,
    mod_id: u32,
    edit: &ModEdit,
) -> Result<ModProfile, SubmitError> {
    let profile_path = layout.mod_profile_path(mod_id);
    let baseline = match store.load::<ModProfile>(&profile_path) {
        Some(profile) => profile,
        None => {
            let profile = client
                .mod_profile(mod_id)
                .await
                .map_err(SubmitError::Baseline)?;
            store.save(&profile_path, &profile);
            profile
        }
    };

    let plan = build_plan(&baseline, edit, archiver)?;
    debug!(mod_id, steps = plan.len(), "submitting edit plan");

    for step in &plan {
        debug!(mod_id, step = step.name(), "running submission step");
        let result = match step {
            SubmissionStep::EditProfile(changes) => client.edit_mod_profile(mod_id, changes).await,
            SubmissionStep::AddMedia(additions) => client.add_mod_media(mod_id, additions).await,
            SubmissionStep::DeleteMedia(removals) => {
                client.delete_mod_media(mod_id, removals).await
            }
            SubmissionStep::DeleteTags(tags) => client.delete_mod_tags(mod_id, tags).await,
            SubmissionStep::AddTags(tags) => client.add_mod_tags(mod_id, tags).await,
            SubmissionStep::DeleteKvps(kvps) => client.delete_mod_kvps(mod_id, kvps).await,
            SubmissionStep::AddKvps(kvps) => client.add_mod_kvps(mod_id, kvps).await,
        };
        if let Err(source) = result {
            warn!(mod_id, step = step.name(), error = %source, "submission aborted");
            return Err(SubmitError::Step {
                step: step.name(),
                source,
            });
        }
    }

    let profile = client
        .mod_profile(mod_id)
        .await
        .map_err(SubmitError::Refresh)?;
    store.save(&profile_path, &profile);
    info!(mod_id, steps = plan.len(), "submitted mod changes");
    Ok(profile)
}
