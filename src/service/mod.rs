//! High-level service facade.
//!
//! # Overview
//!
//! - [`ModSyncService`] wires the cache, install manager, and persistent
//!   state around a wire client
//! - [`ServiceConfig`] selects the game, directories, and paging
//! - [`ServiceError`] unifies the component error types
//!
//! Most applications talk to the SDK exclusively through this module; the
//! component modules stay public for callers that need finer control.

mod config;
mod error;
mod facade;

pub use config::{ServiceConfig, DEFAULT_PAGE_SIZE};
pub use error::ServiceError;
pub use facade::ModSyncService;
