use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use watchlist_models::{MovieId, MovieSummary, SearchResults};
use crate::error::SourceError;

/// Common envelope of every OMDb response: `"Response": "True"|"False"` plus
/// an `Error` message on failure.
#[derive(Debug, Deserialize)]
struct OmdbEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbEnvelope {
    fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    fn error_message(&self) -> String {
        self.error.clone().unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct OmdbSearchPage {
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
}

/// OMDb uses "Movie not found!" / "Series not found!" for empty result sets
fn is_not_found(message: &str) -> bool {
    message.to_lowercase().contains("not found")
}

/// Decode a `?s=` search body
pub fn parse_search_response(body: &str) -> Result<SearchResults, SourceError> {
    let envelope: OmdbEnvelope = serde_json::from_str(body)?;

    if !envelope.is_success() {
        let message = envelope.error_message();
        if is_not_found(&message) {
            return Ok(SearchResults::NoResults);
        }
        return Err(SourceError::Api(message));
    }

    let page: OmdbSearchPage = serde_json::from_str(body)?;
    if page.search.is_empty() {
        return Ok(SearchResults::NoResults);
    }
    Ok(SearchResults::Found(page.search))
}

/// Decode an `?i=` detail body
pub fn parse_detail_response(body: &str) -> Result<MovieSummary, SourceError> {
    let envelope: OmdbEnvelope = serde_json::from_str(body)?;

    if !envelope.is_success() {
        return Err(SourceError::Api(envelope.error_message()));
    }

    Ok(serde_json::from_str(body)?)
}

async fn get_body(client: &Client, base_url: &str, params: &[(&str, &str)]) -> Result<String, SourceError> {
    let url = format!("{}/", base_url.trim_end_matches('/'));

    let response = client
        .get(&url)
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Network {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.text().await?)
}

/// Search titles by free text
pub async fn search(client: &Client, base_url: &str, api_key: &str, query: &str) -> Result<SearchResults, SourceError> {
    let body = get_body(client, base_url, &[("s", query), ("apikey", api_key)]).await?;
    let results = parse_search_response(&body)?;

    debug!(query = %query, results = results.movies().len(), "OMDb search response decoded");
    Ok(results)
}

/// Look up one title by id
pub async fn get_detail(client: &Client, base_url: &str, api_key: &str, id: &MovieId) -> Result<MovieSummary, SourceError> {
    let body = get_body(client, base_url, &[("i", id.as_str()), ("apikey", api_key)]).await?;
    let movie = parse_detail_response(&body)?;

    debug!(movie_id = %id, title = %movie.title, "OMDb detail response decoded");
    Ok(movie)
}

#[cfg(test)]
mod tests;
