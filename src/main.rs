//! podcast-publisher CLI entry point

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::instrument::WithSubscriber;

use podcast_publisher::cli::{build_dispatch, run, Cli, EXIT_ERROR, EXIT_SUCCESS};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayVersion => ExitCode::from(EXIT_SUCCESS),
                _ => ExitCode::from(EXIT_ERROR),
            };
        }
    };

    let dispatch = build_dispatch(cli.dbg);
    run(cli).with_subscriber(dispatch).await
}
