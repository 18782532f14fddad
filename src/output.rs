//! Colored diagnostics and progress reporting
//!
//! Uses owo-colors for terminal colors and indicatif for the fetch spinner.
//! Everything here goes to stderr; stdout carries only the response body.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Print a detail line (dimmed)
/// Example: "     GET http://example.com (attempt 1/3)"
pub fn detail(message: &str) {
    eprintln!("     {}", message.dimmed());
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Create a spinner shown while a request is in flight.
///
/// indicatif hides it on its own when stderr is not a terminal.
pub fn fetch_spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    spinner_to(ProgressDrawTarget::stderr(), message)
}

/// Spinner drawing to `target`. Hidden spinners get no ticker thread.
fn spinner_to(target: ProgressDrawTarget, message: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, target);
    let style = ProgressStyle::default_spinner()
        .template("  {spinner:.cyan} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(message.to_string());
    if !pb.is_hidden() {
        pb.enable_steady_tick(Duration::from_millis(80));
    }
    pb
}
