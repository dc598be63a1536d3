use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use watchlist_models::{MovieId, MovieSummary, RenderToken, WatchlistView};
use crate::identifier_set::IdentifierSet;
use crate::render::WatchlistRenderer;
use crate::storage::{StorageError, WatchlistStorage};
use crate::view_state::ViewState;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The write failed and the in-memory change was rolled back
    #[error("failed to persist watchlist: {0}")]
    Storage(#[from] StorageError),
}

/// Handle on a scheduled render pass
#[derive(Debug)]
pub struct RenderTicket {
    token: RenderToken,
    handle: JoinHandle<bool>,
}

impl RenderTicket {
    pub fn token(&self) -> RenderToken {
        self.token
    }

    /// Wait for the pass to finish. True if its result is the one now shown.
    pub async fn wait(self) -> bool {
        match self.handle.await {
            Ok(shown) => shown,
            Err(e) => {
                warn!(token = self.token, error = %e, "Render task did not complete");
                false
            }
        }
    }
}

/// What a mutation did
#[derive(Debug)]
pub enum Mutation {
    /// Nothing changed: no write, no render
    Unchanged,
    /// State changed, was persisted, and a render pass was scheduled
    Applied(RenderTicket),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }

    pub fn ticket(self) -> Option<RenderTicket> {
        match self {
            Mutation::Applied(ticket) => Some(ticket),
            Mutation::Unchanged => None,
        }
    }
}

/// Sole owner of watchlist membership.
///
/// Every mutation follows the same sequence: change the in-memory set, write
/// the whole set to storage, then schedule a render of a snapshot. The write
/// finishes before the render is scheduled; if it fails, the in-memory change
/// is undone so memory never drifts from what is on disk.
///
/// Mutations take `&mut self`, so they are serialized by ownership. Render
/// passes run on spawned tasks and must be issued from inside a Tokio runtime.
pub struct WatchlistSynchronizer {
    ids: IdentifierSet,
    storage: WatchlistStorage,
    renderer: WatchlistRenderer,
    view: Arc<ViewState>,
}

impl WatchlistSynchronizer {
    /// Build the synchronizer from whatever is persisted. Does not render.
    pub fn hydrate(storage: WatchlistStorage, renderer: WatchlistRenderer) -> Self {
        let persisted = storage.load();
        let persisted_len = persisted.len();
        let ids = IdentifierSet::from_ids(persisted);

        if ids.len() != persisted_len {
            debug!(
                persisted = persisted_len,
                unique = ids.len(),
                "Collapsed duplicate ids in persisted watchlist"
            );
        }
        info!(count = ids.len(), "Watchlist hydrated");

        Self {
            ids,
            storage,
            renderer,
            view: Arc::new(ViewState::new()),
        }
    }

    /// Initial render after hydration
    pub fn start(&self) -> RenderTicket {
        self.schedule_render()
    }

    pub fn ids(&self) -> &IdentifierSet {
        &self.ids
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.ids.contains(id)
    }

    /// Shared handle on the displayed view
    pub fn view_state(&self) -> Arc<ViewState> {
        Arc::clone(&self.view)
    }

    pub fn current_view(&self) -> Option<WatchlistView> {
        self.view.current()
    }

    pub fn add(&mut self, id: MovieId) -> Result<Mutation, SyncError> {
        if self.ids.contains(&id) {
            debug!(movie_id = %id, "Already on watchlist");
            return Ok(Mutation::Unchanged);
        }

        let previous = self.ids.clone();
        self.ids.insert(id.clone());
        let ticket = self.commit(previous)?;
        info!(movie_id = %id, count = self.ids.len(), "Added to watchlist");
        Ok(Mutation::Applied(ticket))
    }

    /// Add the movie behind a search result card
    pub fn on_add(&mut self, movie: &MovieSummary) -> Result<Mutation, SyncError> {
        self.add(movie.id.clone())
    }

    pub fn remove(&mut self, id: &MovieId) -> Result<Mutation, SyncError> {
        if !self.ids.contains(id) {
            debug!(movie_id = %id, "Not on watchlist");
            return Ok(Mutation::Unchanged);
        }

        let previous = self.ids.clone();
        self.ids.remove(id);
        let ticket = self.commit(previous)?;
        info!(movie_id = %id, count = self.ids.len(), "Removed from watchlist");
        Ok(Mutation::Applied(ticket))
    }

    /// Drop every entry
    pub fn clear(&mut self) -> Result<Mutation, SyncError> {
        if self.ids.is_empty() {
            return Ok(Mutation::Unchanged);
        }

        let previous = self.ids.clone();
        let removed = previous.len();
        self.ids.clear();
        let ticket = self.commit(previous)?;
        info!(removed, "Cleared watchlist");
        Ok(Mutation::Applied(ticket))
    }

    /// Re-render without changing membership (retries failed entries)
    pub fn refresh(&self) -> RenderTicket {
        self.schedule_render()
    }

    fn commit(&mut self, previous: IdentifierSet) -> Result<RenderTicket, SyncError> {
        if let Err(e) = self.storage.save(self.ids.as_slice()) {
            warn!(error = %e, "Failed to persist watchlist, rolling back");
            self.ids = previous;
            return Err(e.into());
        }
        Ok(self.schedule_render())
    }

    fn schedule_render(&self) -> RenderTicket {
        let token = self.view.issue_token();
        let ids = self.ids.to_vec();
        let renderer = self.renderer.clone();
        let view = Arc::clone(&self.view);

        let handle = tokio::spawn(async move { renderer.run_pass(token, ids, &view).await });
        RenderTicket { token, handle }
    }
}
