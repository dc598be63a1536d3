pub mod traits;
pub mod omdb;
pub mod error;

pub use traits::MovieSource;
pub use omdb::OmdbClient;
pub use error::SourceError;
