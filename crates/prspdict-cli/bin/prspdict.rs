//! `prspdict` binary entry point.
//!
//! Logs go to stderr so stdout carries only the lookup result. Any error is
//! printed with its context chain and the process exits with status 1.

use prspdict_cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::from_args();
    tracing::debug!(dictionary = ?cli.dictionary, command = ?cli.command, "Starting lookup");

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
