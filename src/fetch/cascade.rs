//! Pagination cascade for list endpoints.

use std::future::Future;

use tracing::debug;

use crate::client::{ClientError, Page};

/// Fetch every item behind a paginated endpoint.
///
/// `fetch_page` is called with `(offset, limit)` pairs starting at offset
/// zero and advancing by `page_size` until a page comes back short or the
/// reported total is reached. Items are returned in server order. A page
/// error aborts the cascade and discards everything collected so far.
///
/// `page_size` must be non-zero.
pub async fn fetch_all<T, F, Fut>(page_size: u32, mut fetch_page: F) -> Result<Vec<T>, ClientError>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, ClientError>>,
{
    let mut collected = Vec::new();
    let mut offset = 0u32;

    loop {
        let page = fetch_page(offset, page_size).await?;
        let count = page.items.len() as u32;
        let total = page.total;
        collected.extend(page.items);

        if count < page_size || offset + count >= total {
            debug!(items = collected.len(), "pagination cascade complete");
            return Ok(collected);
        }
        offset += page_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn paged(items: &[u32], offset: u32, limit: u32) -> Page<u32> {
        let window = items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .copied()
            .collect();
        Page::new(window, items.len() as u32)
    }

    #[tokio::test]
    async fn test_collects_all_pages_in_order() {
        let items: Vec<u32> = (1..=7).collect();
        let requests = AtomicUsize::new(0);

        let result = fetch_all(3, |offset, limit| {
            requests.fetch_add(1, Ordering::SeqCst);
            let page = paged(&items, offset, limit);
            async move { Ok(page) }
        })
        .await;

        assert_eq!(result, Ok(items));
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exact_multiple_stops_without_extra_request() {
        let items: Vec<u32> = (1..=6).collect();
        let requests = AtomicUsize::new(0);

        let result = fetch_all(3, |offset, limit| {
            requests.fetch_add(1, Ordering::SeqCst);
            let page = paged(&items, offset, limit);
            async move { Ok(page) }
        })
        .await;

        assert_eq!(result, Ok(items));
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_short_page() {
        let items: Vec<u32> = vec![10, 20];
        let requests = AtomicUsize::new(0);

        let result = fetch_all(100, |offset, limit| {
            requests.fetch_add(1, Ordering::SeqCst);
            let page = paged(&items, offset, limit);
            async move { Ok(page) }
        })
        .await;

        assert_eq!(result, Ok(items));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let result: Result<Vec<u32>, _> =
            fetch_all(50, |_, _| async { Ok(Page::new(Vec::new(), 0)) }).await;
        assert_eq!(result, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_mid_cascade_error_discards_partial_results() {
        let items: Vec<u32> = (1..=9).collect();
        let requests = AtomicUsize::new(0);

        let result = fetch_all(3, |offset, limit| {
            let attempt = requests.fetch_add(1, Ordering::SeqCst);
            let page = paged(&items, offset, limit);
            async move {
                if attempt == 1 {
                    Err(ClientError::Timeout {
                        url: "https://api.example/mods".to_string(),
                    })
                } else {
                    Ok(page)
                }
            }
        })
        .await;

        assert_eq!(
            result,
            Err(ClientError::Timeout {
                url: "https://api.example/mods".to_string(),
            })
        );
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }
}
