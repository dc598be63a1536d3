use super::search::search_and_print;
use super::session::{self, Session};
use super::watchlist::{save_failed, show};
use crate::output::Output;
use color_eyre::Result;
use owo_colors::OwoColorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use watchlist_core::{Mutation, WatchlistSynchronizer};
use watchlist_models::{MovieId, MovieSummary};

const HELP: &str = "\
Commands:
  search <title>     search movies by title
  add <n|id>         add result #n from the last search, or a movie id
  remove <n|id>      remove entry #n from the watchlist, or a movie id
  list               show the watchlist
  refresh            re-fetch every entry (retries failed ones)
  clear              remove everything
  help               show this help
  quit               leave the session";

/// Reference to a movie typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the last search results or the current view
    Position(usize),
    Id(MovieId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Add(Target),
    Remove(Target),
    List,
    Refresh,
    Clear,
    Help,
    Quit,
    Nothing,
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Nothing,
        "search" | "s" if rest.is_empty() => return Err("Please enter a title to search for".to_string()),
        "search" | "s" => ShellCommand::Search(rest.to_string()),
        "add" | "a" => ShellCommand::Add(parse_target(rest)?),
        "remove" | "rm" => ShellCommand::Remove(parse_target(rest)?),
        "list" | "ls" => ShellCommand::List,
        "refresh" => ShellCommand::Refresh,
        "clear" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command `{}` (type `help`)", other)),
    };
    Ok(command)
}

fn parse_target(arg: &str) -> Result<Target, String> {
    if arg.is_empty() {
        return Err("Expected a result number or a movie id".to_string());
    }
    match arg.trim_start_matches('#').parse::<usize>() {
        Ok(0) => Err("Positions start at 1".to_string()),
        Ok(position) => Ok(Target::Position(position)),
        Err(_) => Ok(Target::Id(MovieId::from(arg))),
    }
}

pub async fn run_shell(output: &Output) -> Result<()> {
    let Session { source, mut sync } = session::open()?;
    let mut last_results: Vec<MovieSummary> = Vec::new();

    show(&sync, None, output).await?;
    if output.is_human() && !output.is_quiet() {
        println!("{}", "Type `help` for commands, `quit` to leave.".bright_black());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if output.is_human() && !output.is_quiet() {
            write_prompt(&mut std::io::stdout())?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(msg) => {
                output.warn(msg);
                continue;
            }
        };
        tracing::debug!(?command, "Shell command");

        match command {
            ShellCommand::Nothing => {}
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Search(query) => {
                // A failed search keeps the previous results addressable
                match search_and_print(source.as_ref(), &query, output).await {
                    Ok(movies) => last_results = movies,
                    Err(e) => output.error(e.to_string()),
                }
            }
            ShellCommand::Add(target) => add(&mut sync, &last_results, target, output).await?,
            ShellCommand::Remove(target) => remove(&mut sync, target, output).await?,
            ShellCommand::List => show(&sync, None, output).await?,
            ShellCommand::Refresh => show(&sync, Some(sync.refresh()), output).await?,
            ShellCommand::Clear => match sync.clear() {
                Ok(mutation) => apply(&sync, mutation, "Your watchlist is already empty", output).await?,
                Err(e) => output.error(save_failed(e).to_string()),
            },
        }
    }

    tracing::debug!("Shell session ended");
    Ok(())
}

fn write_prompt(out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "{} ", "cinelist>".cyan())?;
    out.flush()
}

async fn add(
    sync: &mut WatchlistSynchronizer,
    last_results: &[MovieSummary],
    target: Target,
    output: &Output,
) -> Result<()> {
    let result = match target {
        Target::Position(position) => match last_results.get(position - 1) {
            Some(movie) => {
                let result = sync.on_add(movie);
                if matches!(result, Ok(Mutation::Applied(_))) {
                    output.success(format!("Added \"{}\" to your watchlist", movie.title));
                }
                result
            }
            None => {
                output.warn(format!("No search result #{}", position));
                return Ok(());
            }
        },
        Target::Id(id) => {
            let result = sync.add(id.clone());
            if matches!(result, Ok(Mutation::Applied(_))) {
                output.success(format!("Added {} to your watchlist", id));
            }
            result
        }
    };

    match result {
        Ok(mutation) => apply(sync, mutation, "Already on your watchlist", output).await,
        Err(e) => {
            output.error(save_failed(e).to_string());
            Ok(())
        }
    }
}

async fn remove(sync: &mut WatchlistSynchronizer, target: Target, output: &Output) -> Result<()> {
    let id = match target {
        Target::Id(id) => id,
        Target::Position(position) => {
            let view = sync.current_view();
            let entry_id = view
                .as_ref()
                .and_then(|v| v.entries.get(position - 1))
                .and_then(|entry| entry.removal_target())
                .cloned();
            match entry_id {
                Some(id) => id,
                None => {
                    output.warn(format!("No watchlist entry #{}", position));
                    return Ok(());
                }
            }
        }
    };

    match sync.remove(&id) {
        Ok(mutation) => {
            if mutation.is_applied() {
                output.success(format!("Removed {} from your watchlist", id));
            }
            apply(sync, mutation, "Not on your watchlist", output).await
        }
        Err(e) => {
            output.error(save_failed(e).to_string());
            Ok(())
        }
    }
}

async fn apply(
    sync: &WatchlistSynchronizer,
    mutation: Mutation,
    unchanged_msg: &str,
    output: &Output,
) -> Result<()> {
    match mutation.ticket() {
        Some(ticket) => show(sync, Some(ticket), output).await,
        None => {
            output.info(unchanged_msg);
            Ok(())
        }
    }
}
