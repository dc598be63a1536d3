use super::session;
use crate::output::{Output, NO_RESULTS_MESSAGE, SEARCH_FAILED_MESSAGE};
use crate::ui::RenderSpinner;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlist_config::PathManager;
use watchlist_models::{MovieSummary, SearchResults};
use watchlist_sources::MovieSource;

pub async fn run_search(query: Vec<String>, output: &Output) -> Result<()> {
    let query = query.join(" ");
    let query = query.trim();
    if query.is_empty() {
        output.warn("Please enter a title to search for");
        return Ok(());
    }

    let config = session::load_config(&PathManager::default())?;
    let source = session::provider(&config)?;

    search_and_print(source.as_ref(), query, output).await?;
    Ok(())
}

/// Run one search pass and print it. Returns the movies shown.
///
/// Any failure aborts the pass with the generic message; details go to the log.
pub async fn search_and_print(
    source: &dyn MovieSource,
    query: &str,
    output: &Output,
) -> Result<Vec<MovieSummary>> {
    let spinner = RenderSpinner::start(output, format!("Searching for \"{}\"...", query));
    let result = source.search(query).await;
    spinner.finish();

    match result {
        Ok(SearchResults::Found(movies)) => {
            output.search_results(query, &movies);
            Ok(movies)
        }
        Ok(SearchResults::NoResults) => {
            output.info(NO_RESULTS_MESSAGE);
            Ok(Vec::new())
        }
        Err(e) => {
            tracing::error!(query = %query, error = %e, "Error fetching movies");
            Err(eyre!(SEARCH_FAILED_MESSAGE))
        }
    }
}
