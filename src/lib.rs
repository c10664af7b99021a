//! ModSync - client SDK for the mod.io catalog
//!
//! This library gives game integrations a cached, installable view of a
//! remote mod catalog: profiles and media are fetched through an injected
//! wire client, written through a self-healing disk cache, and mod content
//! is extracted into versioned install directories the game loads from.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use modsync::client::ModQuery;
//! use modsync::service::{ModSyncService, ServiceConfig};
//!
//! let service = ModSyncService::new(client, ServiceConfig::new(51));
//!
//! let catalog = service.fetch_all_mods(&ModQuery::new(51)).await?;
//! service.fetch_mod_binary(1203, 900).await?;
//! service.install(1203, 900).await?;
//! ```
//!
//! The component modules ([`cache`], [`fetch`], [`manager`], [`submit`])
//! stay public for callers that need finer control over one piece.

pub mod archive;
pub mod cache;
pub mod catalog;
pub mod client;
pub mod fetch;
pub mod manager;
pub mod service;
pub mod storage;
pub mod submit;

/// Version of the ModSync library.
///
/// The version is defined in `Cargo.toml` and injected at compile time;
/// persistent records carry it so old formats can be migrated forward.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
