//! Write a default ewe.toml.

use anyhow::{Context, Result};
use colored::Colorize;
use ewe::core::config::CONFIG_FILE_NAME;
use ewe::prelude::*;
use std::path::PathBuf;

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Ewe settings...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!("  {} {} already exists (use --force to overwrite)", "•".yellow(), config_path.display());
        return Ok(());
    }

    Settings::default()
        .save(&config_path)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    println!("  {} Created {}", "✓".green(), config_path.display());

    println!();
    println!("API keys are read from the environment, never from the file:");
    println!("  {} export ANTHROPIC_API_KEY=...   (or OPENAI_API_KEY with provider = \"openai\")", "•".blue());
    println!("  {} export NCBI_API_KEY=...        (optional, raises PubMed rate limits)", "•".blue());
    println!();
    println!("Next steps:");
    println!("  {} ewe research \"bitter leaf for malaria\"", "1.".blue());
    println!("  {} ewe chat", "2.".blue());

    Ok(())
}
