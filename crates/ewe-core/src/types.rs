//! Shared types used across the research pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a fetched record carries no `ArticleTitle`.
pub const NO_TITLE: &str = "No Title Available";

/// One literature record parsed from the fetch endpoint's XML.
///
/// Records are immutable once built; a research session holds them keyed by
/// [`ArticleRecord::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// External identifier (PubMed PMID).
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Author display names, "LastName Initials".
    pub authors: Vec<String>,
    pub journal: String,
    pub pub_date: String,
}

impl ArticleRecord {
    /// Create a record with an id and title; everything else empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            abstract_text: String::new(),
            authors: Vec::new(),
            journal: String::new(),
            pub_date: String::new(),
        }
    }

    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = journal.into();
        self
    }

    pub fn with_pub_date(mut self, pub_date: impl Into<String>) -> Self {
        self.pub_date = pub_date.into();
        self
    }

    /// Title and abstract joined, the text scanned for plant names.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }

    /// Citation token used in synthesized answers.
    pub fn citation(&self) -> String {
        format!("[PMID:{}]", self.id)
    }
}

/// The two pharmacopoeia corpora the herbal reference table draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceCorpus {
    NigerianHerbalPharmacopoeia,
    WestAfricanHerbalPharmacopoeia,
}

impl SourceCorpus {
    /// Short tag, rendered verbatim into prompts.
    pub fn tag(&self) -> &'static str {
        match self {
            SourceCorpus::NigerianHerbalPharmacopoeia => "NHP",
            SourceCorpus::WestAfricanHerbalPharmacopoeia => "WAHP",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SourceCorpus::NigerianHerbalPharmacopoeia => "Nigerian Herbal Pharmacopoeia",
            SourceCorpus::WestAfricanHerbalPharmacopoeia => "West African Herbal Pharmacopoeia",
        }
    }
}

impl fmt::Display for SourceCorpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.tag())
    }
}

/// A static excerpt from the herbal reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerbalExcerpt {
    pub id: String,
    pub text: String,
    pub source: SourceCorpus,
    pub page: u32,
    /// Placeholder embedding; not a semantic representation.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl HerbalExcerpt {
    pub fn new(id: impl Into<String>, text: impl Into<String>, source: SourceCorpus, page: u32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source,
            page,
            embedding: Vec::new(),
        }
    }

    pub fn citation(&self) -> String {
        format!("[{}]", self.id)
    }
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a research session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
            is_error: false,
        }
    }

    /// An assistant turn flagged as an error.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(text)
        }
    }
}

/// Append-only sequence of turns scoped to one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn; used when the session is reset.
    pub fn reset(&mut self) {
        self.turns.clear();
    }
}

/// Localized names for one scientific plant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNameRecord {
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub yoruba: Option<String>,
    #[serde(default)]
    pub igbo: Option<String>,
    #[serde(default)]
    pub hausa: Option<String>,
    #[serde(default, rename = "isNativeToNigeria")]
    pub native_to_nigeria: bool,
    /// Set when the lookup failed and this record is a placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl LocalNameRecord {
    /// Placeholder for a name whose lookup failed.
    pub fn unresolved(scientific_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: None,
            yoruba: None,
            igbo: None,
            hausa: None,
            native_to_nigeria: false,
            note: Some(reason.into()),
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.note.is_some()
    }
}

/// Scientific name → localized names, in lookup order.
pub type EnrichmentTable = Vec<LocalNameRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_builder_and_citation() {
        let article = ArticleRecord::new("111", "Bitter leaf extracts")
            .with_abstract("aqueous extracts were tested")
            .with_authors(vec!["Adeyemi O".into()])
            .with_journal("J Ethnopharmacol")
            .with_pub_date("Mar 2021");

        assert_eq!(article.citation(), "[PMID:111]");
        assert_eq!(article.searchable_text(), "Bitter leaf extracts aqueous extracts were tested");
        assert_eq!(article.authors.len(), 1);
    }

    #[test]
    fn article_serializes_abstract_field() {
        let article = ArticleRecord::new("1", "t").with_abstract("a");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["abstract"], "a");
    }

    #[test]
    fn corpus_tags_are_distinct() {
        assert_eq!(SourceCorpus::NigerianHerbalPharmacopoeia.tag(), "NHP");
        assert_eq!(SourceCorpus::WestAfricanHerbalPharmacopoeia.tag(), "WAHP");
        assert!(SourceCorpus::NigerianHerbalPharmacopoeia.to_string().contains("NHP"));
    }

    #[test]
    fn conversation_is_append_only_until_reset() {
        let mut conversation = Conversation::new();
        conversation.push(ConversationTurn::user("neem bark"));
        conversation.push(ConversationTurn::error("An error occurred"));

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.turns()[0].role, Role::User);
        assert!(conversation.last().unwrap().is_error);
        assert_eq!(conversation.last().unwrap().role, Role::Assistant);

        conversation.reset();
        assert!(conversation.is_empty());
    }

    #[test]
    fn local_name_record_parses_camel_case() {
        let json = r#"{
            "scientificName": "Vernonia amygdalina",
            "commonName": "Bitter leaf",
            "yoruba": "Ewuro",
            "igbo": "Onugbu",
            "hausa": "Shiwaka",
            "isNativeToNigeria": true
        }"#;

        let record: LocalNameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.yoruba.as_deref(), Some("Ewuro"));
        assert!(record.native_to_nigeria);
        assert!(!record.is_unresolved());
    }

    #[test]
    fn unresolved_record_is_not_native() {
        let record = LocalNameRecord::unresolved("Khaya senegalensis", "timeout");
        assert!(!record.native_to_nigeria);
        assert!(record.is_unresolved());
        assert_eq!(record.scientific_name, "Khaya senegalensis");
    }
}
