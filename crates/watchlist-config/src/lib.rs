pub mod config;
pub mod paths;

pub use config::{Config, ConfigError, OmdbConfig, RenderConfig, API_KEY_ENV, DEFAULT_OMDB_URL};
pub use paths::{base_path_override, PathManager, BASE_PATH_ENV};
