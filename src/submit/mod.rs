//! Edit submission for mod profiles.
//!
//! # Overview
//!
//! Profile edits are buffered locally, diffed against the last known
//! profile, and submitted as an ordered list of remote calls:
//!
//! 1. [`ModEdit`] snapshots a profile and tracks which fields were touched
//! 2. [`build_plan`] turns the buffer into [`SubmissionStep`]s, computing
//!    set differences for tags, metadata, and media
//! 3. [`submit`] runs the steps in order, stops at the first failure, and
//!    finishes by re-fetching the canonical profile into the cache
//!
//! Completed remote steps are never rolled back; after a partial failure
//! the server holds some of the edit and the cache still holds the profile
//! from before it.

mod buffer;
mod pipeline;
mod plan;

use thiserror::Error;

use crate::archive::ArchiveError;
use crate::client::ClientError;

pub use buffer::{EditField, GalleryEntry, ModEdit};
pub use pipeline::submit;
pub use plan::{build_plan, SubmissionStep};

/// Errors from planning or submitting a profile edit.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The edit buffer is inconsistent; nothing was submitted.
    #[error("Invalid edit: {0}")]
    Validation(String),

    /// Packaging gallery additions failed; nothing was submitted.
    #[error("Failed to package gallery additions: {0}")]
    Archive(#[from] ArchiveError),

    /// The pre-edit profile could not be loaded or fetched.
    #[error("Failed to load baseline profile: {0}")]
    Baseline(#[source] ClientError),

    /// A remote call failed; later steps were not attempted.
    #[error("Submission step {step} failed: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: ClientError,
    },

    /// Every step succeeded but the closing profile refresh failed. The
    /// cache keeps the pre-edit profile.
    #[error("Failed to refresh profile after submission: {0}")]
    Refresh(#[source] ClientError),
}
