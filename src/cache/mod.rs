//! Disk-backed object cache.
//!
//! [`CacheLayout`] derives every path under the cache root; [`CacheStore`]
//! reads and writes records at those paths through the injected storage
//! driver. Higher layers combine the two with the fetch orchestration in
//! [`crate::fetch`] to get write-through caching of remote resources.

mod layout;
mod stats;
mod store;

pub use layout::CacheLayout;
pub use stats::CacheStats;
pub use store::CacheStore;
