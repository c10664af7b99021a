//! Boundary to the remote catalog service.
//!
//! The wire protocol lives outside this crate; everything here is the
//! contract it must satisfy. [`ClientError`] values travel through the SDK
//! untouched so callers see exactly what the wire client reported.

mod traits;
mod types;

pub use traits::{CatalogClient, CatalogEditor};
pub use types::{ClientError, MediaAdditions, MediaRemovals, ModQuery, Page, ProfileChanges};
