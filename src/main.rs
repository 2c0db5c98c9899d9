use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use a3s_crontab::cli::{self, Cli};

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli::run(&cli)
}
