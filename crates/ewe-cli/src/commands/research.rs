//! One-shot research command.

use anyhow::{Context, Result};
use colored::Colorize;
use ewe::prelude::*;
use indicatif::ProgressBar;

use super::render;
use crate::config;

pub async fn run(settings: &Settings, query: &str, proxy: bool, json: bool) -> Result<()> {
    let pipeline = config::build_pipeline(settings, proxy)?;

    if !json {
        println!("{} Researching: {}", "→".blue(), query);
    }

    let pb = if json { ProgressBar::hidden() } else { render::spinner() };
    let progress = |line: &str| pb.set_message(line.to_string());

    let outcome = pipeline.run(query, &progress).await;
    pb.finish_and_clear();
    let outcome = outcome.context("Research failed")?;

    if json {
        let body = serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?;
        println!("{}", body);
    } else {
        render::print_outcome(&outcome);
    }

    Ok(())
}
