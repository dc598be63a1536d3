use super::session::{self, Session};
use crate::output::Output;
use crate::ui::wait_for_render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchlist_core::{Mutation, RenderTicket, SyncError, WatchlistSynchronizer};
use watchlist_models::MovieId;

pub async fn run_list(output: &Output) -> Result<()> {
    let Session { sync, .. } = session::open()?;
    show(&sync, None, output).await
}

pub async fn run_refresh(output: &Output) -> Result<()> {
    let Session { sync, .. } = session::open()?;
    if sync.ids().is_empty() {
        output.info("Nothing to refresh");
    }
    show(&sync, Some(sync.refresh()), output).await
}

pub async fn run_add(ids: Vec<String>, output: &Output) -> Result<()> {
    let Session { mut sync, .. } = session::open()?;
    let mut latest = None;

    for raw in ids {
        let id = parse_id(&raw)?;
        match sync.add(id.clone()).map_err(save_failed)? {
            Mutation::Applied(ticket) => {
                output.success(format!("Added {} to your watchlist", id));
                latest = Some(ticket);
            }
            Mutation::Unchanged => output.info(format!("{} is already on your watchlist", id)),
        }
    }

    show(&sync, latest, output).await
}

pub async fn run_remove(ids: Vec<String>, output: &Output) -> Result<()> {
    let Session { mut sync, .. } = session::open()?;
    let mut latest = None;

    for raw in ids {
        let id = parse_id(&raw)?;
        match sync.remove(&id).map_err(save_failed)? {
            Mutation::Applied(ticket) => {
                output.success(format!("Removed {} from your watchlist", id));
                latest = Some(ticket);
            }
            Mutation::Unchanged => output.info(format!("{} is not on your watchlist", id)),
        }
    }

    show(&sync, latest, output).await
}

pub async fn run_clear(output: &Output) -> Result<()> {
    let Session { mut sync, .. } = session::open()?;
    let count = sync.ids().len();

    match sync.clear().map_err(save_failed)? {
        Mutation::Applied(ticket) => {
            output.success(format!("Removed {} movie(s) from your watchlist", count));
            show(&sync, Some(ticket), output).await
        }
        Mutation::Unchanged => {
            output.info("Your watchlist is already empty");
            Ok(())
        }
    }
}

/// Wait for `ticket` (or start a fresh pass) and print whatever view is current
pub async fn show(sync: &WatchlistSynchronizer, ticket: Option<RenderTicket>, output: &Output) -> Result<()> {
    let ticket = ticket.unwrap_or_else(|| sync.start());
    wait_for_render(ticket, output).await;

    match sync.current_view() {
        Some(view) => output.watchlist(&view),
        None => output.warn("The watchlist could not be rendered"),
    }
    Ok(())
}

pub fn parse_id(raw: &str) -> Result<MovieId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(eyre!("Movie id cannot be empty"));
    }
    Ok(MovieId::from(trimmed))
}

pub fn save_failed(e: SyncError) -> color_eyre::Report {
    eyre!("Could not save your watchlist, nothing was changed: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_trims() {
        assert_eq!(parse_id("  tt001 ").unwrap(), MovieId::from("tt001"));
        assert!(parse_id("   ").is_err());
    }
}
