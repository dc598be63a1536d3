use std::collections::HashSet;
use watchlist_models::MovieId;

/// Watchlist membership: unique ids in insertion order.
///
/// Order is kept so the rendered list is stable across reloads; the set half
/// answers membership without scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    order: Vec<MovieId>,
    members: HashSet<MovieId>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a sequence that may contain duplicates. First occurrence wins.
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = MovieId>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.members.contains(id)
    }

    /// Returns false if the id was already present
    pub fn insert(&mut self, id: MovieId) -> bool {
        if !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Returns false if the id was not present
    pub fn remove(&mut self, id: &MovieId) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieId> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[MovieId] {
        &self.order
    }

    pub fn to_vec(&self) -> Vec<MovieId> {
        self.order.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MovieId {
        MovieId::from(s)
    }

    #[test]
    fn test_size_equals_distinct_ids_added() {
        let mut set = IdentifierSet::new();
        let adds = ["tt001", "tt002", "tt001", "tt003", "tt002", "tt001"];
        for a in adds {
            set.insert(id(a));
        }

        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice(), &[id("tt001"), id("tt002"), id("tt003")]);
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut set = IdentifierSet::new();
        assert!(set.insert(id("tt001")));
        assert!(!set.insert(id("tt001")));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut set = IdentifierSet::from_ids(vec![id("a"), id("b"), id("c")]);
        assert!(set.remove(&id("b")));
        assert!(!set.remove(&id("b")));
        assert_eq!(set.as_slice(), &[id("a"), id("c")]);
        assert!(!set.contains(&id("b")));
    }

    #[test]
    fn test_from_ids_collapses_duplicates() {
        let set = IdentifierSet::from_ids(vec![id("b"), id("a"), id("b")]);
        assert_eq!(set.to_vec(), vec![id("b"), id("a")]);
    }

    #[test]
    fn test_clear() {
        let mut set = IdentifierSet::from_ids(vec![id("a"), id("b")]);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&id("a")));
    }
}
