//! `sbom-engine` CLI binary.
//!
//! This is the entry point for the thin command-line harness around the
//! core resolution pipeline. It initializes logging via `tracing`, parses
//! arguments with `clap`, and dispatches to the one implemented command.

mod cli;
mod commands;
mod input;

use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse();

    let default_filter = if args.verbose { "debug" } else { &args.loglevel };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    commands::dispatch(args).await
}
