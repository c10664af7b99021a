//! Get-or-fetch wrappers around the cache.

use std::future::Future;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::CacheStore;
use crate::catalog::ImageVersions;
use crate::client::ClientError;

/// Load a record from cache, or fetch and write it through.
///
/// A cache hit never invokes `fetch`. On a miss the fetched value is saved
/// before being returned; a fetch error passes through unchanged and
/// nothing is cached.
pub async fn get_or_fetch<T, F, Fut>(
    store: &CacheStore,
    path: &Path,
    fetch: F,
) -> Result<T, ClientError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    if let Some(record) = store.load::<T>(path) {
        debug!(path = %path.display(), "cache hit");
        return Ok(record);
    }

    debug!(path = %path.display(), "cache miss, fetching");
    let record = fetch().await?;
    store.save(path, &record);
    Ok(record)
}

/// [`get_or_fetch`] with a freshness check on the cached record.
///
/// A cached record failing `fresh` counts as a miss but is not deleted; it
/// stays readable until the next successful fetch overwrites it.
pub async fn get_or_fetch_where<T, P, F, Fut>(
    store: &CacheStore,
    path: &Path,
    fresh: P,
    fetch: F,
) -> Result<T, ClientError>
where
    T: Serialize + DeserializeOwned,
    P: Fn(&T) -> bool,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    if let Some(record) = store.load::<T>(path) {
        if fresh(&record) {
            debug!(path = %path.display(), "cache hit");
            return Ok(record);
        }
        debug!(path = %path.display(), "cache record stale, fetching");
    } else {
        debug!(path = %path.display(), "cache miss, fetching");
    }

    let record = fetch().await?;
    store.save(path, &record);
    Ok(record)
}

/// Load a binary payload from cache, or fetch and write it through.
pub async fn get_or_fetch_binary<F, Fut>(
    store: &CacheStore,
    path: &Path,
    fetch: F,
) -> Result<Vec<u8>, ClientError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, ClientError>>,
{
    if let Some(bytes) = store.load_binary(path) {
        debug!(path = %path.display(), "cache hit");
        return Ok(bytes);
    }

    debug!(path = %path.display(), "cache miss, fetching");
    let bytes = fetch().await?;
    store.save_binary(path, &bytes);
    Ok(bytes)
}

/// Load a sized image rendition, re-fetching when the cached copy was
/// derived from a different upload.
///
/// A hit requires both the rendition file and a version record naming
/// `source_name` as its origin; anything else falls through to `fetch`,
/// which overwrites the rendition and updates the version record.
pub async fn get_or_fetch_versioned_image<F, Fut>(
    store: &CacheStore,
    image_path: &Path,
    versions_path: &Path,
    size_key: &str,
    source_name: &str,
    fetch: F,
) -> Result<Vec<u8>, ClientError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, ClientError>>,
{
    let mut versions: ImageVersions = store.load(versions_path).unwrap_or_default();
    if versions.matches(size_key, source_name) {
        if let Some(bytes) = store.load_binary(image_path) {
            debug!(path = %image_path.display(), "cache hit");
            return Ok(bytes);
        }
    }

    debug!(
        path = %image_path.display(),
        source = source_name,
        "image missing or derived from an older upload, fetching"
    );
    let bytes = fetch().await?;
    if store.save_binary(image_path, &bytes) {
        versions.set_source(size_key, source_name);
        store.save(versions_path, &versions);
    }
    Ok(bytes)
}
