//! Command-line entry point for eargv.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use eargv::Cli;

/// Exit status when a required flag is missing
const USAGE_EXIT: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some((ear, output)) = cli.paths() else {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::from(USAGE_EXIT);
    };

    match eargv::convert(ear, output).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
