//! Factroot CLI
//!
//! Answers engineering questions from standards, datasheets and handbooks,
//! and flags anything that had to be predicted.

use anyhow::Result;
use clap::Parser;
use factroot_core::error::exit_codes;
use factroot_core::{Config, FactRootError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<FactRootError>()
                .map(FactRootError::exit_code)
                .unwrap_or(exit_codes::GENERAL_ERROR)
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!("Loaded config: {:?}", config.engine);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &config, cli.format).await,
        Commands::Batch(args) => commands::batch::run(args, &config, cli.format).await,
        Commands::Verify(args) => commands::verify::run(args, cli.format).await,
    }
}
