//! Unified service error.

use thiserror::Error;

use crate::client::ClientError;
use crate::manager::InstallError;
use crate::submit::SubmitError;

/// Error from any service operation.
///
/// Component errors pass through unchanged; match on the variant to get
/// the original taxonomy back.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote catalog reported a failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Install or uninstall failed.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Edit submission failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The requested media does not exist for this mod.
    #[error("Mod {mod_id} has no media named '{name}'")]
    UnknownMedia { mod_id: u32, name: String },

    /// A blocking task was cancelled or panicked before finishing.
    #[error("Background task failed: {0}")]
    TaskJoin(String),
}
