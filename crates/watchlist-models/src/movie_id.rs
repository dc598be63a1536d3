use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Canonical identifier of a title on the metadata provider (e.g. `tt0133093`).
///
/// Opaque: two ids are the same movie only if their strings are exactly equal.
/// No trimming or case folding happens here, callers hand over what the
/// provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for MovieId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for MovieId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MovieId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_serializes_as_bare_string() {
        let id = MovieId::new("tt0133093");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tt0133093\"");

        let parsed: MovieId = serde_json::from_str("\"tt0133093\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_movie_id_equality_is_exact() {
        assert_eq!(MovieId::from("tt001"), MovieId::new("tt001".to_string()));
        assert_ne!(MovieId::from("tt001"), MovieId::from("TT001"));
        assert_ne!(MovieId::from("tt001"), MovieId::from(" tt001"));
    }
}
