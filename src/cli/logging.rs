//! Logging setup

use std::io::IsTerminal;

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Build the stderr log dispatcher.
///
/// `info` by default, `debug` with source locations when `dbg` is set.
/// `RUST_LOG` overrides the level either way.
pub fn build_dispatch(dbg: bool) -> Dispatch {
    let level = if dbg { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(dbg)
        .with_file(dbg)
        .with_line_number(dbg)
        .finish();

    Dispatch::new(subscriber)
}
