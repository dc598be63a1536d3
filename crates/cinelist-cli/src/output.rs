use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_models::{MovieSummary, RenderEntry, WatchlistView};

pub const EMPTY_WATCHLIST_MESSAGE: &str = "Your watchlist is empty. Search for movies to add!";
pub const FAILED_ENTRY_MESSAGE: &str = "Could not load this movie. Please try again later.";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Please try a different search.";
pub const SEARCH_FAILED_MESSAGE: &str =
    "Sorry, something went wrong while fetching movies. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Success,
    Info,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message(Level::Success, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message(Level::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message(Level::Warning, msg.as_ref());
    }

    /// Shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        self.message(Level::Error, msg.as_ref());
    }

    fn message(&self, level: Level, msg: &str) {
        if self.quiet && !matches!(level, Level::Error) {
            return;
        }

        match self.format {
            OutputFormat::Human => match level {
                Level::Success => println!("{} {}", "✓".green(), msg),
                Level::Info => println!("{}", msg),
                Level::Warning => println!("{} {}", "⚠".yellow(), msg),
                Level::Error => eprintln!("{} {}", "✗".red(), msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": level.tag(), "message": msg }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }

    /// Print a rendered watchlist as cards (human) or as the view object (JSON)
    pub fn watchlist(&self, view: &WatchlistView) {
        if !self.is_human() {
            let value = serde_json::to_value(view).unwrap_or_default();
            self.json(&json!({ "type": "watchlist", "view": value }));
            return;
        }
        if self.quiet {
            return;
        }

        if view.is_empty_state() {
            println!("{}", EMPTY_WATCHLIST_MESSAGE.bright_black());
            return;
        }

        let mut table = card_table(vec!["#", "ID", "Title", "Year", "Poster"]);
        for (index, entry) in view.entries.iter().enumerate() {
            let cells = entry_cells(index + 1, entry);
            let row: Vec<Cell> = if entry.is_failed() {
                cells.into_iter().map(|c| Cell::new(c).fg(Color::Red)).collect()
            } else {
                cells.into_iter().map(Cell::new).collect()
            };
            table.add_row(row);
        }
        println!("{}", table);

        let failed = view.failed_count();
        if failed > 0 {
            println!(
                "{}",
                format!(
                    "{} item(s) could not be loaded. Run `cinelist list` to retry or `cinelist remove <ID>` to drop them.",
                    failed
                )
                .yellow()
            );
        }
    }

    /// Print search results as numbered cards
    pub fn search_results(&self, query: &str, movies: &[MovieSummary]) {
        if !self.is_human() {
            self.json(&json!({
                "type": "search_results",
                "query": query,
                "results": movies,
            }));
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = card_table(vec!["#", "ID", "Title", "Year", "Poster"]);
        for (index, movie) in movies.iter().enumerate() {
            table.add_row(movie_cells(index + 1, movie));
        }
        println!("{}", table);
        println!("{}", "Add one with `cinelist add <ID>`.".bright_black());
    }
}

fn card_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(
        header
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn movie_cells(position: usize, movie: &MovieSummary) -> Vec<String> {
    vec![
        position.to_string(),
        movie.id.to_string(),
        movie.title.clone(),
        movie.year.clone(),
        movie.poster().unwrap_or("-").to_string(),
    ]
}

fn entry_cells(position: usize, entry: &RenderEntry) -> Vec<String> {
    match entry {
        RenderEntry::Movie(movie) => movie_cells(position, movie),
        RenderEntry::Failed { id } => vec![
            position.to_string(),
            id.to_string(),
            FAILED_ENTRY_MESSAGE.to_string(),
            String::new(),
            String::new(),
        ],
        RenderEntry::Empty => vec![
            position.to_string(),
            String::new(),
            EMPTY_WATCHLIST_MESSAGE.to_string(),
            String::new(),
            String::new(),
        ],
    }
}
