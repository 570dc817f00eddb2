//! Binary crate for the `woozy` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - First-run configuration bootstrap messaging
//! - Human-friendly output formatting

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod icons;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);
    cmd.run().await
}

/// Logs go to stderr so stdout carries only the report. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
