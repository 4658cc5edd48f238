//! `estail` binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use estail::cli::normalize_args;
use estail::{Cli, HttpBackend, TailConfig, TailError, Tailer, EXIT_FATAL};

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries only log lines.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create async runtime: {e}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(cli: Cli) -> Result<(), TailError> {
    let config = TailConfig::try_from(cli)?;
    let backend = HttpBackend::new(&config.host, config.request_timeout)?;
    let mut stdout = io::stdout().lock();

    Tailer::new(backend, config).run(&mut stdout).await
}
