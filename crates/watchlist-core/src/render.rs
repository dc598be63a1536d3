use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};
use watchlist_config::RenderConfig;
use watchlist_models::{MovieId, RenderEntry, RenderToken, WatchlistView};
use watchlist_sources::MovieSource;
use crate::view_state::ViewState;

/// Turns a snapshot of watchlist ids into display entries.
///
/// Every id gets its own detail fetch; fetches overlap, and a failing fetch
/// only degrades its own entry. Output order always follows input order.
#[derive(Clone)]
pub struct WatchlistRenderer {
    source: Arc<dyn MovieSource>,
    max_concurrent: Option<usize>,
}

impl WatchlistRenderer {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            source,
            max_concurrent: None,
        }
    }

    pub fn from_config(source: Arc<dyn MovieSource>, config: &RenderConfig) -> Self {
        Self::new(source).with_max_concurrent(config.max_concurrent_fetches)
    }

    /// Bound the number of fetches in flight. None (or 0) means unbounded.
    pub fn with_max_concurrent(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent = limit.filter(|n| *n > 0);
        self
    }

    pub fn source(&self) -> &Arc<dyn MovieSource> {
        &self.source
    }

    /// Resolve `ids` to entries, positionally.
    pub async fn render(&self, ids: &[MovieId]) -> Vec<RenderEntry> {
        if ids.is_empty() {
            return vec![RenderEntry::Empty];
        }

        let fetches: Vec<_> = ids.iter().map(|id| self.resolve(id)).collect();

        // Both paths yield results in input order, not completion order
        match self.max_concurrent {
            Some(limit) => stream::iter(fetches).buffered(limit).collect().await,
            None => join_all(fetches).await,
        }
    }

    async fn resolve(&self, id: &MovieId) -> RenderEntry {
        match self.source.fetch_detail(id).await {
            Ok(movie) => RenderEntry::Movie(movie),
            Err(e) => {
                warn!(
                    movie_id = %id,
                    provider = self.source.source_name(),
                    error = %e,
                    "Could not load watchlist entry"
                );
                RenderEntry::Failed { id: id.clone() }
            }
        }
    }

    /// Run one full pass for `token` and hand the result to `view`.
    /// Returns whether the result was shown.
    pub async fn run_pass(&self, token: RenderToken, ids: Vec<MovieId>, view: &ViewState) -> bool {
        debug!(token, count = ids.len(), "Render pass started");

        let entries = self.render(&ids).await;
        let rendered = WatchlistView::new(token, entries);
        let failed = rendered.failed_count();
        let total = rendered.entries.len();

        let shown = view.publish(rendered);
        if shown {
            info!(token, entries = total, failed, "Watchlist rendered");
        }
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{id, movie, FakeSource};
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_renders_single_empty_entry() {
        let source = Arc::new(FakeSource::new().with_movie(movie("tt001", "Movie A")));
        let renderer = WatchlistRenderer::new(source.clone());

        let entries = renderer.render(&[]).await;
        assert_eq!(entries, vec![RenderEntry::Empty]);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_order_preserved_under_partial_failure() {
        // A finishes last, B fails, C finishes first
        let source = Arc::new(
            FakeSource::new()
                .with_movie(movie("A", "Movie A"))
                .with_movie(movie("C", "Movie C"))
                .with_delay("A", Duration::from_millis(80))
                .with_delay("B", Duration::from_millis(40)),
        );
        let renderer = WatchlistRenderer::new(source);

        let entries = renderer.render(&[id("A"), id("B"), id("C")]).await;
        assert_eq!(
            entries,
            vec![
                RenderEntry::Movie(movie("A", "Movie A")),
                RenderEntry::Failed { id: id("B") },
                RenderEntry::Movie(movie("C", "Movie C")),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetches_overlap() {
        // Each fetch waits until all three are in flight, so a sequential
        // renderer would never finish.
        let source = Arc::new(
            FakeSource::new()
                .with_movie(movie("A", "Movie A"))
                .with_movie(movie("B", "Movie B"))
                .with_movie(movie("C", "Movie C"))
                .with_rendezvous(3),
        );
        let renderer = WatchlistRenderer::new(source);

        let entries = tokio::time::timeout(
            Duration::from_secs(2),
            renderer.render(&[id("A"), id("B"), id("C")]),
        )
        .await
        .expect("fetches were not issued concurrently");
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn test_bounded_concurrency_keeps_order() {
        let source = Arc::new(
            FakeSource::new()
                .with_movie(movie("A", "Movie A"))
                .with_movie(movie("B", "Movie B"))
                .with_movie(movie("C", "Movie C"))
                .with_movie(movie("D", "Movie D"))
                .with_delay("A", Duration::from_millis(30))
                .with_delay("C", Duration::from_millis(10)),
        );
        let renderer = WatchlistRenderer::new(source.clone()).with_max_concurrent(Some(2));

        let entries = renderer.render(&[id("A"), id("B"), id("C"), id("D")]).await;
        let order: Vec<_> = entries
            .iter()
            .map(|e| e.removal_target().unwrap().to_string())
            .collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert!(source.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_all_failures_still_render() {
        let source = Arc::new(FakeSource::new());
        let renderer = WatchlistRenderer::new(source);

        let entries = renderer.render(&[id("x"), id("y")]).await;
        assert_eq!(
            entries,
            vec![RenderEntry::Failed { id: id("x") }, RenderEntry::Failed { id: id("y") }]
        );
    }

    #[tokio::test]
    async fn test_run_pass_publishes() {
        let source = Arc::new(FakeSource::new().with_movie(movie("tt001", "Movie A")));
        let renderer = WatchlistRenderer::new(source);
        let view = ViewState::new();

        let token = view.issue_token();
        assert!(renderer.run_pass(token, vec![id("tt001")], &view).await);

        let shown = view.current().unwrap();
        assert_eq!(shown.entries, vec![RenderEntry::Movie(movie("tt001", "Movie A"))]);
    }
}
