use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;
use watchlist_models::{MovieId, MovieSummary, SearchResults};
use watchlist_sources::{MovieSource, SourceError};
use crate::storage::{KeyValueStore, StorageError};

pub fn id(value: &str) -> MovieId {
    MovieId::from(value)
}

pub fn movie(movie_id: &str, title: &str) -> MovieSummary {
    MovieSummary::new(movie_id, title, "2020", "N/A")
}

/// In-memory provider. Ids without a registered movie fail with a 404.
#[derive(Default)]
pub struct FakeSource {
    movies: HashMap<MovieId, MovieSummary>,
    delays: HashMap<MovieId, Duration>,
    rendezvous: Option<Arc<Barrier>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, movie: MovieSummary) -> Self {
        self.movies.insert(movie.id.clone(), movie);
        self
    }

    pub fn with_delay(mut self, movie_id: &str, delay: Duration) -> Self {
        self.delays.insert(id(movie_id), delay);
        self
    }

    /// Every fetch blocks until `n` fetches are in flight at once
    pub fn with_rendezvous(mut self, n: usize) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(n)));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MovieSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<SearchResults, SourceError> {
        let query = query.to_lowercase();
        let found: Vec<MovieSummary> = self
            .movies
            .values()
            .filter(|m| m.title.to_lowercase().contains(&query))
            .cloned()
            .collect();
        if found.is_empty() {
            Ok(SearchResults::NoResults)
        } else {
            Ok(SearchResults::Found(found))
        }
    }

    async fn fetch_detail(&self, movie_id: &MovieId) -> Result<MovieSummary, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
        if let Some(delay) = self.delays.get(movie_id) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.movies.get(movie_id).cloned().ok_or_else(|| SourceError::Network {
            status: 404,
            body: format!("no movie {}", movie_id),
        })
    }
}

/// Store whose every operation fails
#[derive(Default)]
pub struct FailingStore {
    writes: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}

/// Memory-backed store that counts writes
#[derive(Default)]
pub struct RecordingStore {
    inner: crate::storage::MemoryStore,
    writes: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Decode what is currently persisted, bypassing the adapter's recovery
    pub fn persisted(&self) -> Option<Vec<MovieId>> {
        self.inner
            .get(crate::storage::WATCHLIST_KEY)
            .ok()
            .flatten()
            .map(|raw| serde_json::from_str(&raw).expect("persisted watchlist is valid json"))
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
