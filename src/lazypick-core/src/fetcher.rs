//! Transport seam for page fetching.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::paging::RemotePage;

/// Fetches one page of display-ready items from the remote dataset.
///
/// Implementations own the transport and the record-to-label projection;
/// the controller only ever sees formatted labels and the remote total.
/// `lazypick-remote` ships the reference implementation; tests use stubs.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `limit` items starting `offset` items into the dataset.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<RemotePage, FetchError>;
}
