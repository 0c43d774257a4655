mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::generate::{self, GenerateArgs};
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "weeklog",
    author,
    version,
    about = "Weekly changelog generation from recent commits"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize recent commits by week and merge them into the changelog (default).
    Generate(GenerateArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        error!("{error}");
        eprintln!("Error: {}", error.message());
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "weeklog=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config(args)) => config_cmd::run(args.command),
        Some(Commands::Generate(args)) => generate::run(args).await,
        None => generate::run(GenerateArgs::default()).await,
    }
}
