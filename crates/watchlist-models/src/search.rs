use serde::{Deserialize, Serialize};
use crate::movie::MovieSummary;

/// Outcome of a free-text search.
///
/// "Nothing matched" is a well-formed answer from the provider, not a failure,
/// so it gets its own variant instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum SearchResults {
    Found(Vec<MovieSummary>),
    NoResults,
}

impl SearchResults {
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            SearchResults::Found(movies) => movies,
            SearchResults::NoResults => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies().is_empty()
    }
}
