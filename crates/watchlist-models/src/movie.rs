use serde::{Deserialize, Serialize};
use crate::movie_id::MovieId;

/// Card-level description of a movie as returned by both search and detail lookups.
///
/// Field names follow the provider's wire format (`imdbID`, `Title`, `Year`,
/// `Poster`) on deserialization; serialization keeps the aliases so JSON
/// output round-trips through the same type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub id: MovieId,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
}

impl MovieSummary {
    pub fn new(
        id: impl Into<MovieId>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster_url: poster_url.into(),
        }
    }

    /// Poster URL, or None when the provider has no artwork (it sends "N/A")
    pub fn poster(&self) -> Option<&str> {
        match self.poster_url.as_str() {
            "" | "N/A" => None,
            url => Some(url),
        }
    }
}
