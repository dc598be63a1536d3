use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use watchlist_core::RenderTicket;

/// Spinner shown while detail fetches are in flight.
/// Hidden for JSON output, quiet mode and non-terminals.
pub struct RenderSpinner {
    spinner: Option<ProgressBar>,
}

impl RenderSpinner {
    pub fn start(output: &Output, msg: impl Into<String>) -> Self {
        if !output.is_human() || output.is_quiet() || !is_interactive() {
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
        {
            spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        spinner.set_message(msg.into());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self {
            spinner: Some(spinner),
        }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Wait for a render pass with a spinner up
pub async fn wait_for_render(ticket: RenderTicket, output: &Output) -> bool {
    let spinner = RenderSpinner::start(output, "Loading watchlist...");
    let shown = ticket.wait().await;
    spinner.finish();
    shown
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
