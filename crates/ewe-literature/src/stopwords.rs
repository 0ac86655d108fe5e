//! Stop-word stripping for user queries.

/// Words removed before a query becomes the core of a search term. Includes
/// conversational filler and the words the context clauses already inject.
const STOP_WORDS: &[&str] = &[
    // articles, pronouns, auxiliaries
    "a", "an", "the", "this", "that", "these", "those", "i", "me", "my", "we", "our", "you",
    "your", "it", "its", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did",
    "can", "could", "would", "should", "will", "may", "might", "has", "have", "had",
    // prepositions and conjunctions
    "of", "for", "in", "on", "at", "to", "from", "with", "by", "about", "into", "and", "or",
    "as", "if", "than",
    // question words and filler
    "what", "whats", "which", "who", "whom", "how", "why", "when", "where", "tell", "show",
    "find", "give", "list", "explain", "please", "any", "some", "there", "know", "known",
    "called", "call", "name", "names", "local", "locally", "use", "used", "uses", "using",
    "good", "best",
    // injected by the location and medical clauses
    "nigeria", "nigerian", "nigerians", "traditional", "medicine", "medicinal", "herbal",
];

/// Whether `word` (already lowercased) is dropped from queries.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Strip stop words from `raw`, keeping the remaining tokens in order.
///
/// Tokens split on whitespace and punctuation (hyphens stay inside words).
/// When nothing survives, the trimmed raw query is returned instead.
pub fn clean_query(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let core: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .map(|t| t.trim_matches('-'))
        .filter(|t| !t.is_empty())
        .filter(|t| !is_stop_word(t))
        .filter(|t| t.chars().count() > 1 || t.chars().all(|c| c.is_ascii_digit()))
        .collect();

    if core.is_empty() {
        raw.trim().to_string()
    } else {
        core.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_location_and_filler() {
        assert_eq!(
            clean_query("what is the local name for jute leaf in nigeria"),
            "jute leaf"
        );
    }

    #[test]
    fn strips_punctuation_and_case() {
        assert_eq!(
            clean_query("What's Bitter-Leaf used for, in Nigerian medicine?"),
            "bitter-leaf"
        );
    }

    #[test]
    fn keeps_order() {
        assert_eq!(
            clean_query("neem bark malaria fever"),
            "neem bark malaria fever"
        );
    }

    #[test]
    fn falls_back_to_raw_when_everything_is_stripped() {
        assert_eq!(clean_query("  what is the  "), "what is the");
        assert_eq!(clean_query("Nigeria"), "Nigeria");
    }

    #[test]
    fn single_letters_are_dropped_but_digits_kept() {
        assert_eq!(clean_query("vitamin c type 2 diabetes"), "vitamin type 2 diabetes");
    }
}
