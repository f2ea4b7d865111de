//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print one `git status --porcelain` line, colored by change kind
    pub fn change(&self, line: &str) {
        println!("  {}", Self::format_change(line));
    }

    fn format_change(line: &str) -> ColoredString {
        let code = line.get(..2).unwrap_or(line).trim();
        match code {
            "??" | "A" => line.green(),
            "D" => line.red(),
            _ => line.yellow(),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
