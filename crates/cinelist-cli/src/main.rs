use clap::{ArgAction, Parser, Subcommand};
use commands::{config, search, shell, watchlist};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;
mod ui;

#[derive(Parser)]
#[command(name = "cinelist")]
#[command(about = "cinelist - search movies and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file (rotated daily) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Add movies to the watchlist by id (e.g. tt0133093)
    Add {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Remove movies from the watchlist by id
    Remove {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Show the watchlist (details are fetched fresh on every run)
    List,
    /// Re-render the watchlist without changing it
    Refresh,
    /// Remove every movie from the watchlist
    Clear,
    /// Interactive session: search, add and remove without restarting
    #[command(long_about = "Start an interactive session. The watchlist is loaded once and kept in memory; every change is saved immediately and the list is re-rendered. Type `help` inside the session for commands.")]
    Shell,
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a configuration file
    Init {
        /// OMDb API key
        #[arg(long)]
        api_key: String,

        /// Override the OMDb endpoint
        #[arg(long)]
        base_url: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Limit detail fetches in flight while rendering the watchlist
        #[arg(long)]
        max_concurrent_fetches: Option<usize>,

        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print where configuration and data live
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Add { ids } => watchlist::run_add(ids, &output).await,
        Commands::Remove { ids } => watchlist::run_remove(ids, &output).await,
        Commands::List => watchlist::run_list(&output).await,
        Commands::Refresh => watchlist::run_refresh(&output).await,
        Commands::Clear => watchlist::run_clear(&output).await,
        Commands::Shell => shell::run_shell(&output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
