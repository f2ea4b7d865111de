//! CLI layer - Command-line interface
//!
//! Contains argument parsing, logging setup, output formatting,
//! and the subcommand runner.

pub mod app;
pub mod args;
pub mod logging;
pub mod presenter;

// Re-export commonly used types
pub use app::{run, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands};
pub use logging::build_dispatch;
pub use presenter::Presenter;
