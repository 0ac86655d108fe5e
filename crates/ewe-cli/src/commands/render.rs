//! Terminal rendering shared by `research` and `chat`.

use colored::Colorize;
use ewe::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner whose message tracks pipeline progress lines.
pub fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the synthesis followed by the sources it could cite.
pub fn print_outcome(outcome: &ResearchOutcome) {
    match outcome.tier {
        Some(tier) => println!(
            "{} {} articles via {}",
            "✓".green(),
            outcome.articles.len(),
            tier
        ),
        None => println!("{} No literature found for \"{}\"", "•".yellow(), outcome.core_query),
    }
    println!();
    println!("{}", outcome.synthesis);

    if !outcome.enrichment.is_empty() {
        println!();
        println!("{}", "Local names".bold());
        for record in &outcome.enrichment {
            println!("  {} {}", "•".blue(), local_names_line(record));
        }
    }

    if outcome.articles.is_empty() && outcome.excerpts.is_empty() {
        return;
    }

    println!();
    println!("{}", "Sources".bold());
    for article in &outcome.articles {
        println!("  {} {}", article.citation().cyan(), article.title);
        let meta = article_meta(article);
        if !meta.is_empty() {
            println!("      {}", meta.dimmed());
        }
    }
    for scored in &outcome.excerpts {
        let excerpt = &scored.excerpt;
        println!(
            "  {} {}, p. {}",
            excerpt.citation().magenta(),
            excerpt.source,
            excerpt.page
        );
    }
}

/// "Journal, date", skipping empty parts.
pub fn article_meta(article: &ArticleRecord) -> String {
    [article.journal.as_str(), article.pub_date.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn local_names_line(record: &LocalNameRecord) -> String {
    if record.is_unresolved() {
        return format!("{}: no local names found", record.scientific_name);
    }

    let mut parts = Vec::new();
    for (label, value) in [
        ("common", &record.common_name),
        ("Yoruba", &record.yoruba),
        ("Igbo", &record.igbo),
        ("Hausa", &record.hausa),
    ] {
        if let Some(value) = value {
            parts.push(format!("{}: {}", label, value));
        }
    }
    if parts.is_empty() {
        parts.push("no local names found".to_string());
    }

    format!("{} ({})", record.scientific_name, parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_meta_skips_empty_parts() {
        let article = ArticleRecord::new("1", "t").with_pub_date("2020");
        assert_eq!(article_meta(&article), "2020");

        let article = article.with_journal("Malar J");
        assert_eq!(article_meta(&article), "Malar J, 2020");

        assert_eq!(article_meta(&ArticleRecord::new("2", "t")), "");
    }

    #[test]
    fn test_local_names_line() {
        let record = LocalNameRecord {
            scientific_name: "Ocimum gratissimum".into(),
            common_name: Some("Scent leaf".into()),
            yoruba: Some("Efinrin".into()),
            igbo: None,
            hausa: Some("Daidoya".into()),
            native_to_nigeria: true,
            note: None,
        };
        assert_eq!(
            local_names_line(&record),
            "Ocimum gratissimum (common: Scent leaf, Yoruba: Efinrin, Hausa: Daidoya)"
        );

        let failed = LocalNameRecord::unresolved("Khaya senegalensis", "timeout");
        assert_eq!(local_names_line(&failed), "Khaya senegalensis: no local names found");
    }
}
