//! Page sources and the concurrent multi-page fetch.

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::error::Error;

use super::PageWindow;

/// Something that can produce one page of artworks.
///
/// [`ArticClient`](crate::ArticClient) implements this over HTTP; tests and
/// front ends can provide their own.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the 1-based `page` at the given page size.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<PageWindow, Error>;
}

/// Fetches `count` consecutive pages starting at `first_page`, concurrently.
///
/// All requests are issued at once and joined all-or-nothing: the first
/// failure is returned and the other results are dropped. On success the
/// pages are returned in page order regardless of completion order.
pub async fn fetch_pages<S: PageSource + ?Sized>(
    source: &S,
    first_page: u32,
    count: u32,
    limit: u32,
) -> Result<Vec<PageWindow>, Error> {
    let requests = (0..count).map(|i| source.fetch_page(first_page.saturating_add(i), limit));
    try_join_all(requests).await
}
