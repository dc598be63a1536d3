use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use watchlist_config::{Config, PathManager};
use watchlist_core::{FileStore, WatchlistRenderer, WatchlistStorage, WatchlistSynchronizer};
use watchlist_sources::{MovieSource, OmdbClient};

/// Everything one command needs: the provider and the hydrated watchlist
pub struct Session {
    pub source: Arc<dyn MovieSource>,
    pub sync: WatchlistSynchronizer,
}

/// Load and validate configuration (file plus environment override)
pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    config.validate().map_err(|e| {
        eyre!(
            "{}\nRun `cinelist config init --api-key <KEY>` to create {}",
            e,
            config_file.display()
        )
    })?;
    Ok(config)
}

pub fn provider(config: &Config) -> Result<Arc<dyn MovieSource>> {
    let client = OmdbClient::from_config(&config.omdb)
        .map_err(|e| eyre!("Failed to create OMDb client: {}", e))?;
    Ok(Arc::new(client))
}

/// Hydrate the watchlist from local storage. Does not render.
pub fn open() -> Result<Session> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create data directories: {}", e))?;

    let source = provider(&config)?;
    let storage = WatchlistStorage::new(Box::new(FileStore::new(path_manager.storage_dir())));
    let renderer = WatchlistRenderer::from_config(Arc::clone(&source), &config.render);

    tracing::debug!(storage = %path_manager.storage_dir().display(), "Opening watchlist");
    let sync = WatchlistSynchronizer::hydrate(storage, renderer);

    Ok(Session { source, sync })
}
