//! Ewe CLI - literature research for Nigerian traditional medicine.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ewe")]
#[command(author, version, about = "Ewe - research Nigerian traditional medicine in PubMed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (default: ewe.toml in this or a parent directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default ewe.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing ewe.toml
        #[arg(long)]
        force: bool,
    },

    /// Research one question and print the report
    Research {
        /// The question, e.g. "bitter leaf for malaria"
        query: String,

        /// Go through the ewe-web relay instead of calling NCBI directly
        #[arg(long)]
        proxy: bool,

        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive research session
    Chat {
        /// Go through the ewe-web relay instead of calling NCBI directly
        #[arg(long)]
        proxy: bool,
    },

    /// Search the built-in pharmacopoeia excerpts
    Herbs {
        /// Search text
        query: String,

        /// Number of excerpts to show
        #[arg(short = 'k', long, default_value = "2")]
        top_k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep logs off the spinner unless asked for.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Research { query, proxy, json } => {
            let settings = config::load_settings(cli.config.as_deref())?;
            commands::research::run(&settings, &query, proxy, json).await
        }
        Commands::Chat { proxy } => {
            let settings = config::load_settings(cli.config.as_deref())?;
            commands::chat::run(&settings, proxy).await
        }
        Commands::Herbs { query, top_k } => commands::herbs::run(&query, top_k),
    }
}
