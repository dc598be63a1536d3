use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::MovieSummary;
use crate::movie_id::MovieId;

/// Sequence number handed to a render pass when it is scheduled.
/// Later passes always get larger tokens.
pub type RenderToken = u64;

/// One card of the rendered watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderEntry {
    /// Detail resolved for this id
    Movie(MovieSummary),
    /// Detail fetch failed. The id is kept so the entry can still be removed or retried.
    Failed { id: MovieId },
    /// The watchlist is empty. Always the only entry of its view.
    Empty,
}

impl RenderEntry {
    /// Id the card's remove action is bound to, if it has one
    pub fn removal_target(&self) -> Option<&MovieId> {
        match self {
            RenderEntry::Movie(movie) => Some(&movie.id),
            RenderEntry::Failed { id } => Some(id),
            RenderEntry::Empty => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RenderEntry::Failed { .. })
    }
}

/// Result of one complete render pass.
///
/// Built fresh every pass and swapped in whole; never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistView {
    pub token: RenderToken,
    pub entries: Vec<RenderEntry>,
    pub rendered_at: DateTime<Utc>,
}

impl WatchlistView {
    pub fn new(token: RenderToken, entries: Vec<RenderEntry>) -> Self {
        Self {
            token,
            entries,
            rendered_at: Utc::now(),
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self.entries.as_slice(), [RenderEntry::Empty])
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_failed()).count()
    }
}
