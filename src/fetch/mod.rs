//! Cache-first fetch orchestration.
//!
//! These helpers sit between the service facade and a [`CatalogClient`]:
//! each one consults the cache first, reaches the network only on a miss
//! or stale record, and writes fetched data back through the cache.
//!
//! [`CatalogClient`]: crate::client::CatalogClient

mod cascade;
mod orchestrator;

pub use cascade::fetch_all;
pub use orchestrator::{
    get_or_fetch, get_or_fetch_binary, get_or_fetch_versioned_image, get_or_fetch_where,
};
