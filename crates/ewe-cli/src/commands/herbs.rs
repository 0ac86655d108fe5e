//! Search the built-in herbal reference table.

use anyhow::Result;
use colored::Colorize;
use ewe::prelude::*;

pub fn run(query: &str, top_k: usize) -> Result<()> {
    let store = HerbalStore::builtin();

    println!("{} Searching {} pharmacopoeia excerpts: {}", "→".blue(), store.len(), query);
    println!(
        "  {} scores come from placeholder embeddings, not semantic similarity",
        "•".yellow()
    );
    println!();

    for (i, scored) in store.search(query, top_k).iter().enumerate() {
        let excerpt = &scored.excerpt;
        println!(
            "{}. {} {} (score: {:.3})",
            i + 1,
            excerpt.citation().magenta(),
            excerpt.source,
            scored.score
        );
        println!("   p. {}: {}", excerpt.page, excerpt.text);
        println!();
    }

    Ok(())
}
