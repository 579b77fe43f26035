use async_trait::async_trait;

use crate::error::AppError;
use crate::models::search::SearchResultItem;

/// Text search against the backend, as consumed by the search box.
///
/// Implementations must tolerate overlapping calls; the coordinator discards
/// stale responses itself. Futures are not `Send` because browser fetches
/// are bound to the UI thread.
#[async_trait(?Send)]
pub trait SearchGateway {
    /// Return posts matching `query`, best match first.
    ///
    /// Fails with [`AppError::Network`] or [`AppError::Server`].
    async fn search_posts(&self, query: &str) -> Result<Vec<SearchResultItem>, AppError>;
}
