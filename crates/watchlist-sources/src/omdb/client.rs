use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use watchlist_config::OmdbConfig;
use watchlist_models::{MovieId, MovieSummary, SearchResults};

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url,
        }
    }

    pub fn from_config(config: &OmdbConfig) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<SearchResults, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SourceError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        match api::search(&self.client, &self.base_url, &self.api_key, query).await {
            Ok(results) => {
                info!(
                    query = %query,
                    results = results.movies().len(),
                    provider = "omdb",
                    "Title search completed"
                );
                Ok(results)
            }
            Err(e) => {
                warn!(query = %query, error = %e, provider = "omdb", "Title search failed");
                Err(e)
            }
        }
    }

    async fn fetch_detail(&self, id: &MovieId) -> Result<MovieSummary, SourceError> {
        api::get_detail(&self.client, &self.base_url, &self.api_key, id).await
    }
}
