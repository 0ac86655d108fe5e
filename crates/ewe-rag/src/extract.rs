//! Latin binomial candidates from article text.
//!
//! A candidate is a capitalized word followed by a lowercase word, optionally
//! followed by a botanical authority abbreviation (`L.`, `Lam.`, `Benth.`...).
//! The authority is consumed so it cannot start the next match, but it is not
//! part of the candidate. This is a heuristic: it over-matches ordinary
//! sentence starts, which the filters below prune.

use ewe_core::types::ArticleRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static BINOMIAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"\b([A-Z][a-z]+)\s+([a-z]+)\b(?:\s+(?:L|Linn|Lam|Benth|Hook\.\s?f|DC|Del|Willd|Schum|Thonn|Schumach|Engl|Oliv|Hutch|Dalziel|Jacq|Roxb|Sw|Pers|Poir|Gaertn|A\.\s?Juss|Juss)\.)?",
    )
    .ok()
});

/// Exact matches that are never plant names.
const BLACKLIST: &[&str] = &[
    "In vitro",
    "In vivo",
    "In silico",
    "In situ",
    "Ex vivo",
    "De novo",
    "Per se",
    "Et al",
    "Vice versa",
    "Post hoc",
    "Ad libitum",
    "Status quo",
    "Niger delta",
    "Cross river",
    "Akwa ibom",
    "Plateau state",
    "Sierra leone",
    "Burkina faso",
];

/// Capitalized words that open sentences far more often than they name genera.
const SENTENCE_OPENERS: &[&str] = &[
    "The", "This", "These", "Those", "That", "There", "They", "Their", "Then", "Thus", "Here",
    "In", "We", "Our", "It", "Its", "An", "Of", "On", "For", "From", "With", "To", "At", "By",
    "As", "After", "Before", "During", "Among", "Between", "However", "Although", "Both", "Each",
    "All", "Most", "Many", "Some", "Such", "When", "While", "Which", "What", "Where", "Further",
    "Finally", "Also", "Moreover", "Therefore", "Results", "Methods", "Conclusion",
    "Conclusions", "Background", "Objective", "Objectives", "Aim", "Aims", "Study", "Data",
    "Plants", "Extracts", "Treatment", "Traditional", "Medicinal",
];

/// Lowercase function words that cannot be species epithets.
const FUNCTION_WORDS: &[&str] = &[
    "from", "with", "that", "this", "were", "was", "have", "has", "been", "into", "than", "then",
    "also", "which", "when", "where", "their", "there", "these", "those", "other", "such",
    "both", "each", "some", "more", "most", "used", "using", "about", "after", "before", "among",
    "between", "during", "against", "showed", "shows", "found", "could", "would", "should",
];

fn is_candidate(genus: &str, epithet: &str) -> bool {
    if epithet.len() <= 3 {
        return false;
    }
    if SENTENCE_OPENERS.contains(&genus) || FUNCTION_WORDS.contains(&epithet) {
        return false;
    }
    let binomial = format!("{} {}", genus, epithet);
    !BLACKLIST.contains(&binomial.as_str())
}

/// Candidate binomials in `text`, in order of appearance (duplicates kept).
pub fn binomials_in(text: &str) -> Vec<String> {
    let Some(pattern) = BINOMIAL.as_ref() else {
        return Vec::new();
    };
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let genus = caps.get(1)?.as_str();
            let epithet = caps.get(2)?.as_str();
            is_candidate(genus, epithet).then(|| format!("{} {}", genus, epithet))
        })
        .collect()
}

/// Deduplicated candidate plant names across `articles`, in order of first
/// occurrence.
pub fn extract_plant_names(articles: &[ArticleRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for article in articles {
        for name in binomials_in(&article.searchable_text()) {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }

    tracing::debug!(articles = articles.len(), candidates = names.len(), "extracted plant names");
    names
}
