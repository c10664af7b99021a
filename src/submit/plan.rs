//! Pure diff from an edit buffer to an ordered submission plan.

use std::collections::BTreeSet;

use crate::archive::{ArchiveCodec, ArchiveEntry};
use crate::catalog::{MetadataKvp, ModProfile};
use crate::client::{MediaAdditions, MediaRemovals, ProfileChanges};

use super::buffer::ModEdit;
use super::SubmitError;

/// One remote call the pipeline will make, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStep {
    EditProfile(ProfileChanges),
    AddMedia(MediaAdditions),
    DeleteMedia(MediaRemovals),
    DeleteTags(Vec<String>),
    AddTags(Vec<String>),
    DeleteKvps(Vec<MetadataKvp>),
    AddKvps(Vec<MetadataKvp>),
}

impl SubmissionStep {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EditProfile(_) => "edit_profile",
            Self::AddMedia(_) => "add_media",
            Self::DeleteMedia(_) => "delete_media",
            Self::DeleteTags(_) => "delete_tags",
            Self::AddTags(_) => "add_tags",
            Self::DeleteKvps(_) => "delete_kvps",
            Self::AddKvps(_) => "add_kvps",
        }
    }
}

/// Diff an edit buffer against the baseline profile.
///
/// The returned steps are in the order the pipeline must run them: profile
/// scalars, media additions, media removals, tag removals, tag additions,
/// KVP removals, KVP additions. Collections diff as sets, so reordering a
/// list the user never changed produces no steps; a changed KVP value
/// becomes a removal of the old pair plus an addition of the new one.
///
/// Gallery additions are packaged into one archive through `archiver`.
/// Validation problems in the buffer fail here, before any remote call.
pub fn build_plan(
    baseline: &ModProfile,
    edit: &ModEdit,
    archiver: &dyn ArchiveCodec,
) -> Result<Vec<SubmissionStep>, SubmitError> {
    let mut steps = Vec::new();

    let changes = scalar_changes(edit);
    if !changes.is_empty() {
        steps.push(SubmissionStep::EditProfile(changes));
    }

    let (additions, removals) = media_diff(baseline, edit, archiver)?;
    if !additions.is_empty() {
        steps.push(SubmissionStep::AddMedia(additions));
    }
    if !removals.is_empty() {
        steps.push(SubmissionStep::DeleteMedia(removals));
    }

    if edit.tags.is_dirty() {
        let removed = net_removed(&baseline.tags, edit.tags.get());
        if !removed.is_empty() {
            steps.push(SubmissionStep::DeleteTags(removed));
        }
        let added = net_new(&baseline.tags, edit.tags.get());
        if !added.is_empty() {
            steps.push(SubmissionStep::AddTags(added));
        }
    }

    if edit.metadata_kvps.is_dirty() {
        let current = edit.metadata_kvps.get();
        let removed: Vec<MetadataKvp> = baseline
            .metadata_kvps
            .iter()
            .filter(|kvp| !current.contains(kvp))
            .cloned()
            .collect();
        if !removed.is_empty() {
            steps.push(SubmissionStep::DeleteKvps(removed));
        }
        let added: Vec<MetadataKvp> = current
            .iter()
            .filter(|kvp| !baseline.metadata_kvps.contains(kvp))
            .cloned()
            .collect();
        if !added.is_empty() {
            steps.push(SubmissionStep::AddKvps(added));
        }
    }

    Ok(steps)
}

fn scalar_changes(edit: &ModEdit) -> ProfileChanges {
    let mut changes = ProfileChanges::default();
    if edit.name.is_dirty() {
        changes.name = Some(edit.name.get().clone());
    }
    if edit.name_id.is_dirty() {
        changes.name_id = Some(edit.name_id.get().clone());
    }
    if edit.summary.is_dirty() {
        changes.summary = Some(edit.summary.get().clone());
    }
    if edit.description.is_dirty() {
        changes.description = Some(edit.description.get().clone());
    }
    if edit.homepage_url.is_dirty() {
        changes.homepage_url = Some(edit.homepage_url.get().clone());
    }
    if edit.metadata_blob.is_dirty() {
        changes.metadata_blob = Some(edit.metadata_blob.get().clone());
    }
    if edit.visibility.is_dirty() {
        changes.visibility = Some(*edit.visibility.get());
    }
    if edit.status.is_dirty() {
        changes.status = Some(*edit.status.get());
    }
    changes
}

fn media_diff(
    baseline: &ModProfile,
    edit: &ModEdit,
    archiver: &dyn ArchiveCodec,
) -> Result<(MediaAdditions, MediaRemovals), SubmitError> {
    let mut additions = MediaAdditions::default();
    let mut removals = MediaRemovals::default();

    if edit.logo.is_dirty() {
        let image = edit.logo.get().clone().ok_or_else(|| {
            SubmitError::Validation("logo marked changed without image content".to_string())
        })?;
        additions.logo = Some(image);
    }

    if edit.youtube_urls.is_dirty() {
        additions.youtube_urls = net_new(&baseline.media.youtube_urls, edit.youtube_urls.get());
        removals.youtube_urls = net_removed(&baseline.media.youtube_urls, edit.youtube_urls.get());
    }

    if edit.sketchfab_urls.is_dirty() {
        additions.sketchfab_urls =
            net_new(&baseline.media.sketchfab_urls, edit.sketchfab_urls.get());
        removals.sketchfab_urls =
            net_removed(&baseline.media.sketchfab_urls, edit.sketchfab_urls.get());
    }

    if edit.gallery.is_dirty() {
        let existing: BTreeSet<&str> = baseline
            .media
            .gallery_images
            .iter()
            .map(|image| image.file_name.as_str())
            .collect();

        let mut uploads = Vec::new();
        let mut kept = BTreeSet::new();
        for entry in edit.gallery.get() {
            kept.insert(entry.file_name.as_str());
            if existing.contains(entry.file_name.as_str()) {
                continue;
            }
            let bytes = entry.bytes.as_ref().ok_or_else(|| {
                SubmitError::Validation(format!(
                    "gallery image '{}' has no content to upload",
                    entry.file_name
                ))
            })?;
            uploads.push(ArchiveEntry::new(entry.file_name.clone(), bytes.clone()));
        }
        if !uploads.is_empty() {
            additions.gallery_archive = Some(archiver.create(&uploads)?);
        }

        removals.gallery_file_names = baseline
            .media
            .gallery_images
            .iter()
            .filter(|image| !kept.contains(image.file_name.as_str()))
            .map(|image| image.file_name.clone())
            .collect();
    }

    Ok((additions, removals))
}

/// Values of `new` absent from `old`, deduplicated, in `new` order.
fn net_new(old: &[String], new: &[String]) -> Vec<String> {
    let have: BTreeSet<&str> = old.iter().map(String::as_str).collect();
    let mut seen = BTreeSet::new();
    new.iter()
        .filter(|value| !have.contains(value.as_str()) && seen.insert(value.as_str()))
        .cloned()
        .collect()
}

/// Values of `old` absent from `new`, deduplicated, in `old` order.
fn net_removed(old: &[String], new: &[String]) -> Vec<String> {
    net_new(new, old)
}
