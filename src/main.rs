use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod error;
mod extract;
mod fetch;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - debug logs only with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("c4mine=debug")
    } else {
        EnvFilter::new("c4mine=info")
    };

    // Logs on stderr; stdout is reserved for extracted JSON
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Extract(args) => cli::extract::execute(args),
    }
}
