use async_trait::async_trait;
use watchlist_models::{MovieId, MovieSummary, SearchResults};
use crate::error::SourceError;

/// A movie-metadata provider.
///
/// Implementations are stateless request issuers: every call is one independent
/// request that may fail on its own without affecting other calls.
#[async_trait]
pub trait MovieSource: Send + Sync {
    // Source metadata
    fn source_name(&self) -> &str;

    /// Free-text title search
    async fn search(&self, query: &str) -> Result<SearchResults, SourceError>;

    /// Resolve a single id to its detail record. One request per call, no retries.
    async fn fetch_detail(&self, id: &MovieId) -> Result<MovieSummary, SourceError>;
}
