pub mod extract;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "c4mine")]
#[command(
    author,
    version,
    about = "Mine published Code4rena audit reports into structured JSON"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a list of report URLs and extract each into JSON
    Run(RunArgs),

    /// Extract a single local HTML file (offline debugging)
    Extract(ExtractArgs),
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// Text file with one report URL per line
    #[arg(value_name = "URLS_FILE")]
    pub urls_file: PathBuf,

    /// Path to config file
    #[arg(short, long, default_value = "c4mine.yaml")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Override max concurrent fetches
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// List accepted URLs without fetching
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone)]
pub struct ExtractArgs {
    /// Local HTML file to extract
    #[arg(value_name = "HTML_FILE")]
    pub file: PathBuf,

    /// Write JSON here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}
