pub mod identifier_set;
pub mod render;
pub mod storage;
pub mod sync;
pub mod view_state;

#[cfg(test)]
pub(crate) mod test_support;

pub use identifier_set::IdentifierSet;
pub use render::WatchlistRenderer;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, WatchlistStorage, WATCHLIST_KEY};
pub use sync::{Mutation, RenderTicket, SyncError, WatchlistSynchronizer};
pub use view_state::ViewState;
