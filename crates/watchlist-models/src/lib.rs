pub mod movie;
pub mod movie_id;
pub mod search;
pub mod view;

pub use movie::MovieSummary;
pub use movie_id::MovieId;
pub use search::SearchResults;
pub use view::{RenderEntry, RenderToken, WatchlistView};
