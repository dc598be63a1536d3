use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;
use watchlist_models::{RenderToken, WatchlistView};

/// The currently displayed watchlist plus the render token counter.
///
/// A finished pass is only shown if no newer pass has been scheduled since it
/// started, so a slow pass can never overwrite the result of a later mutation.
#[derive(Debug, Default)]
pub struct ViewState {
    issued: AtomicU64,
    current: RwLock<Option<WatchlistView>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next token. Tokens start at 1.
    pub fn issue_token(&self) -> RenderToken {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest_token(&self) -> RenderToken {
        self.issued.load(Ordering::SeqCst)
    }

    /// Swap `view` in if its token is still the latest issued.
    /// Returns false when the view was stale and got dropped.
    pub fn publish(&self, view: WatchlistView) -> bool {
        let latest = self.latest_token();
        if view.token != latest {
            debug!(token = view.token, latest, "Discarding stale watchlist render");
            return false;
        }

        let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
        if current.as_ref().is_some_and(|shown| shown.token >= view.token) {
            debug!(token = view.token, "Newer watchlist render already shown");
            return false;
        }
        *current = Some(view);
        true
    }

    /// Latest accepted view, if any pass has completed yet
    pub fn current(&self) -> Option<WatchlistView> {
        self.current.read().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlist_models::RenderEntry;

    #[test]
    fn test_tokens_increase() {
        let state = ViewState::new();
        assert_eq!(state.latest_token(), 0);
        assert_eq!(state.issue_token(), 1);
        assert_eq!(state.issue_token(), 2);
        assert_eq!(state.latest_token(), 2);
    }

    #[test]
    fn test_publish_latest() {
        let state = ViewState::new();
        let token = state.issue_token();
        assert!(state.publish(WatchlistView::new(token, vec![RenderEntry::Empty])));
        assert_eq!(state.current().unwrap().token, token);
    }

    #[test]
    fn test_stale_publish_is_discarded() {
        let state = ViewState::new();
        let older = state.issue_token();
        let newer = state.issue_token();

        assert!(state.publish(WatchlistView::new(newer, vec![RenderEntry::Empty])));
        assert!(!state.publish(WatchlistView::new(older, vec![])));

        let shown = state.current().unwrap();
        assert_eq!(shown.token, newer);
        assert!(shown.is_empty_state());
    }

    #[test]
    fn test_older_pass_finishing_first_is_still_dropped() {
        let state = ViewState::new();
        let older = state.issue_token();
        let _newer = state.issue_token();

        assert!(!state.publish(WatchlistView::new(older, vec![RenderEntry::Empty])));
        assert!(state.current().is_none());
    }
}
