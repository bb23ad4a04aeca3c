//! Algolia CLI - manage search indices, dictionaries and transformations.

mod api;
mod cli;
mod commands;
mod config;
mod factory;
mod io;
mod ndjson;
mod template;
mod types;

use clap::Parser;
use cli::Cli;
use factory::Factory;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable (controlled by RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut factory = Factory::new(cli.overrides());

    if let Err(e) = cli.command.execute(&mut factory).await {
        factory.io.stop_progress();
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
