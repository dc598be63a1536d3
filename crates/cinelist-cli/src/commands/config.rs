use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use watchlist_config::{Config, PathManager, API_KEY_ENV};

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init {
            api_key,
            base_url,
            timeout_secs,
            max_concurrent_fetches,
            force,
        } => init_config(
            InitArgs {
                api_key,
                base_url,
                timeout_secs,
                max_concurrent_fetches,
            },
            force,
            output,
        ),
        ConfigCommands::Path => show_paths(output),
    }
}

struct InitArgs {
    api_key: String,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    max_concurrent_fetches: Option<usize>,
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() && std::env::var(API_KEY_ENV).is_err() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Create one with `cinelist config init --api-key <KEY>`.");
        return Ok(());
    }

    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let api_key = if full {
        config.omdb.api_key.clone()
    } else {
        mask_string(&config.omdb.api_key)
    };
    let max_concurrent = config
        .render
        .max_concurrent_fetches
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unbounded".to_string());
    let timeout = config
        .omdb
        .timeout_secs
        .map(|s| format!("{}s", s))
        .unwrap_or_else(|| "client default".to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Setting").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.add_row(vec![Cell::new("Config file"), Cell::new(config_file.display())]);
            table.add_row(vec![Cell::new("OMDb URL"), Cell::new(&config.omdb.base_url)]);
            table.add_row(vec![
                Cell::new("OMDb API key"),
                if config.has_api_key() {
                    Cell::new(api_key)
                } else {
                    Cell::new("<not set>").fg(Color::Red)
                },
            ]);
            table.add_row(vec![Cell::new("Request timeout"), Cell::new(timeout)]);
            table.add_row(vec![Cell::new("Max concurrent fetches"), Cell::new(max_concurrent)]);
            println!("{}", table);

            if let Err(e) = config.validate() {
                println!("{} {}", "⚠".yellow(), e);
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "config_file": config_file.display().to_string(),
                "omdb": {
                    "base_url": config.omdb.base_url,
                    "api_key": api_key,
                    "timeout_secs": config.omdb.timeout_secs,
                },
                "render": {
                    "max_concurrent_fetches": config.render.max_concurrent_fetches,
                },
                "valid": config.validate().is_ok(),
            }));
        }
    }
    Ok(())
}

fn init_config(args: InitArgs, force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    let config = build_config(args);
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    tracing::info!(path = %config_file.display(), "Configuration written");
    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}

fn build_config(args: InitArgs) -> Config {
    let mut config = Config::default();
    config.omdb.api_key = args.api_key.trim().to_string();
    if let Some(url) = args.base_url {
        config.omdb.base_url = url.trim_end_matches('/').to_string();
    }
    config.omdb.timeout_secs = args.timeout_secs;
    config.render.max_concurrent_fetches = args.max_concurrent_fetches;
    config
}

/// Locations the program reads and writes by default.
/// Logs are only written to a file when `--log-file` names one.
fn path_rows(path_manager: &PathManager) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("config", path_manager.config_file()),
        ("storage", path_manager.storage_dir()),
    ]
}

fn show_paths(output: &Output) -> Result<()> {
    let rows = path_rows(&PathManager::default());

    if output.is_human() {
        if !output.is_quiet() {
            for (name, path) in &rows {
                println!("{:<8} {}", name.bright_black(), path.display());
            }
        }
    } else {
        let mut value = json!({ "type": "paths" });
        for (name, path) in &rows {
            value[*name] = json!(path.display().to_string());
        }
        output.json(&value);
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
