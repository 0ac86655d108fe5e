//! Prompt templates for research synthesis and name lookup.

use ewe_core::types::{ArticleRecord, HerbalExcerpt, LocalNameRecord};
use std::fmt::Write;

/// A prompt template for LLM requests.
pub trait PromptTemplate {
    /// Generate the prompt text.
    fn generate(&self) -> String;

    /// Get the system prompt (if any).
    fn system_prompt(&self) -> Option<String> {
        None
    }
}

/// The structured research prompt.
///
/// Context is laid out herbal excerpts first, then article abstracts, each
/// tagged with the citation token the model is asked to reuse.
#[derive(Debug, Clone)]
pub struct SynthesisPrompt<'a> {
    pub query: &'a str,
    pub articles: &'a [ArticleRecord],
    pub excerpts: &'a [HerbalExcerpt],
    pub enrichment: &'a [LocalNameRecord],
}

impl<'a> SynthesisPrompt<'a> {
    pub fn new(query: &'a str, articles: &'a [ArticleRecord]) -> Self {
        Self {
            query,
            articles,
            excerpts: &[],
            enrichment: &[],
        }
    }

    pub fn with_excerpts(mut self, excerpts: &'a [HerbalExcerpt]) -> Self {
        self.excerpts = excerpts;
        self
    }

    pub fn with_enrichment(mut self, enrichment: &'a [LocalNameRecord]) -> Self {
        self.enrichment = enrichment;
        self
    }

    fn context_block(&self) -> String {
        let mut out = String::new();

        for excerpt in self.excerpts {
            let _ = writeln!(
                out,
                "{} Source: {} ({}), p. {}\n{}\n",
                excerpt.citation(),
                excerpt.source.title(),
                excerpt.source.tag(),
                excerpt.page,
                excerpt.text
            );
        }

        for article in self.articles {
            let _ = writeln!(out, "{} {}", article.citation(), article.title);
            if !article.journal.is_empty() || !article.pub_date.is_empty() {
                let _ = writeln!(out, "{} {}", article.journal, article.pub_date);
            }
            if !article.authors.is_empty() {
                let _ = writeln!(out, "Authors: {}", article.authors.join(", "));
            }
            let _ = writeln!(out, "{}\n", article.abstract_text);
        }

        if out.is_empty() {
            out.push_str("(no literature or reference excerpts were found)\n");
        }
        out
    }
}

impl PromptTemplate for SynthesisPrompt<'_> {
    fn system_prompt(&self) -> Option<String> {
        Some(
            "You are Ewe, a research assistant for Nigerian and West African ethnomedicine. \
             Answer only from the supplied context. Cite every claim with the bracketed \
             token shown next to its source. Be cautious: flag toxicity, dosage uncertainty \
             and the absence of clinical evidence. Never invent citations."
                .to_string(),
        )
    }

    fn generate(&self) -> String {
        let enrichment = render_enrichment(self.enrichment);
        let enrichment_section = if enrichment.is_empty() {
            String::new()
        } else {
            format!("Localized plant names:\n{}\n", enrichment)
        };

        format!(
            r#"Question: {query}

{enrichment_section}Write the answer in Markdown using exactly these sections:

## Summary
A short direct answer.

## Plants and Findings
One entry per plant with its findings, each cited inline as [PMID:<id>] or [<excerpt id>].

## Safety Precautions
Known toxicity, contraindications and interactions.

## Preparation Methods
Traditional preparation as reported in the sources.

Context:
---
{context}---
"#,
            query = self.query,
            enrichment_section = enrichment_section,
            context = self.context_block(),
        )
    }
}

/// Bulleted list of localized names, one line per record. Empty input gives an
/// empty string.
pub fn render_enrichment(records: &[LocalNameRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let mut names = Vec::new();
        if let Some(common) = &record.common_name {
            names.push(format!("common: {}", common));
        }
        if let Some(yoruba) = &record.yoruba {
            names.push(format!("Yoruba: {}", yoruba));
        }
        if let Some(igbo) = &record.igbo {
            names.push(format!("Igbo: {}", igbo));
        }
        if let Some(hausa) = &record.hausa {
            names.push(format!("Hausa: {}", hausa));
        }

        let native = if record.native_to_nigeria {
            "native to Nigeria"
        } else {
            "not known to be native to Nigeria"
        };
        let names = if names.is_empty() {
            "no local names found".to_string()
        } else {
            names.join(", ")
        };
        let _ = writeln!(out, "- {}: {} ({})", record.scientific_name, names, native);
    }
    out
}

/// Prompt for localized names of one plant.
#[derive(Debug, Clone)]
pub struct NameLookupPrompt {
    pub scientific_name: String,
}

impl NameLookupPrompt {
    pub fn new(scientific_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
        }
    }
}

impl PromptTemplate for NameLookupPrompt {
    fn system_prompt(&self) -> Option<String> {
        Some(
            "You are an ethnobotanist specialising in Nigerian plants. \
             Respond ONLY with a JSON object, no explanation."
                .to_string(),
        )
    }

    fn generate(&self) -> String {
        format!(
            r#"Give the common English name and the Yoruba, Igbo and Hausa names of the plant {}.
Use null for any name you do not know.

Respond with a JSON object like:
{{"scientificName": "<name>", "commonName": "<name or null>", "yoruba": "<name or null>", "igbo": "<name or null>", "hausa": "<name or null>", "isNativeToNigeria": <true|false>}}

JSON:"#,
            self.scientific_name
        )
    }
}

/// Parse a name-lookup response. A missing `scientificName` falls back to the
/// name that was asked for.
pub fn parse_local_name_json(
    json: &str,
    scientific_name: &str,
) -> Result<LocalNameRecord, serde_json::Error> {
    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawRecord {
        #[serde(default)]
        scientific_name: Option<String>,
        #[serde(default)]
        common_name: Option<String>,
        #[serde(default)]
        yoruba: Option<String>,
        #[serde(default)]
        igbo: Option<String>,
        #[serde(default)]
        hausa: Option<String>,
        #[serde(default)]
        is_native_to_nigeria: Option<bool>,
    }

    let raw: RawRecord = serde_json::from_str(extract_json_object(json))?;
    let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

    Ok(LocalNameRecord {
        scientific_name: non_blank(raw.scientific_name).unwrap_or_else(|| scientific_name.to_string()),
        common_name: non_blank(raw.common_name),
        yoruba: non_blank(raw.yoruba),
        igbo: non_blank(raw.igbo),
        hausa: non_blank(raw.hausa),
        native_to_nigeria: raw.is_native_to_nigeria.unwrap_or(false),
        note: None,
    })
}

/// Extract a JSON object from text (handles markdown code blocks).
fn extract_json_object(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    let text = text.trim();

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use ewe_core::types::SourceCorpus;

    fn articles() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord::new("111", "Antiplasmodial activity of leaf extracts")
                .with_abstract("Extracts reduced parasitaemia in mice.")
                .with_journal("J Ethnopharmacol")
                .with_pub_date("Mar 2019"),
            ArticleRecord::new("222", "Survey of remedies in Ogun State")
                .with_abstract("Forty species were documented."),
        ]
    }

    #[test]
    fn test_prompt_cites_articles_and_excerpt_source() {
        let articles = articles();
        let excerpts = vec![HerbalExcerpt::new(
            "REF-1",
            "Leaves are macerated in water.",
            SourceCorpus::NigerianHerbalPharmacopoeia,
            12,
        )];

        let prompt = SynthesisPrompt::new("malaria treatment", &articles).with_excerpts(&excerpts);
        let generated = prompt.generate();

        assert!(generated.contains("[PMID:111]"));
        assert!(generated.contains("[PMID:222]"));
        assert!(generated.contains("[REF-1]"));
        assert!(generated.contains("Source: Nigerian Herbal Pharmacopoeia (NHP), p. 12"));
        assert!(generated.find("[REF-1]") < generated.find("[PMID:111]"));
    }

    #[test]
    fn test_prompt_has_markdown_skeleton() {
        let articles = articles();
        let generated = SynthesisPrompt::new("malaria treatment", &articles).generate();

        for heading in [
            "## Summary",
            "## Plants and Findings",
            "## Safety Precautions",
            "## Preparation Methods",
        ] {
            assert!(generated.contains(heading), "missing {heading}");
        }
        assert!(generated.contains("Question: malaria treatment"));
    }

    #[test]
    fn test_enrichment_section_omitted_when_empty() {
        let articles = articles();
        let generated = SynthesisPrompt::new("q", &articles).generate();
        assert!(!generated.contains("Localized plant names"));

        let table = vec![LocalNameRecord {
            scientific_name: "Vernonia amygdalina".into(),
            common_name: Some("Bitter leaf".into()),
            yoruba: Some("Ewuro".into()),
            igbo: Some("Onugbu".into()),
            hausa: Some("Shiwaka".into()),
            native_to_nigeria: true,
            note: None,
        }];
        let generated = SynthesisPrompt::new("q", &articles)
            .with_enrichment(&table)
            .generate();
        assert!(generated.contains("Localized plant names"));
        assert!(generated.contains("- Vernonia amygdalina: common: Bitter leaf, Yoruba: Ewuro"));
    }

    #[test]
    fn test_render_unresolved_record() {
        let line = render_enrichment(&[LocalNameRecord::unresolved("Khaya senegalensis", "timeout")]);
        assert_eq!(
            line,
            "- Khaya senegalensis: no local names found (not known to be native to Nigeria)\n"
        );
    }

    #[test]
    fn test_parse_local_name_json() {
        let json = r#"Here you go: {"commonName": "Neem", "yoruba": "Dogonyaro", "igbo": "",
            "hausa": null, "isNativeToNigeria": false}"#;

        let record = parse_local_name_json(json, "Azadirachta indica").unwrap();
        assert_eq!(record.scientific_name, "Azadirachta indica");
        assert_eq!(record.common_name.as_deref(), Some("Neem"));
        assert_eq!(record.igbo, None);
        assert_eq!(record.hausa, None);
        assert!(!record.native_to_nigeria);
        assert!(!record.is_unresolved());
    }

    #[test]
    fn test_parse_local_name_null_native_flag_keeps_names() {
        let json = r#"{"commonName": "Neem", "yoruba": "Dongoyaro", "isNativeToNigeria": null}"#;
        let record = parse_local_name_json(json, "Azadirachta indica").unwrap();
        assert_eq!(record.scientific_name, "Azadirachta indica");
        assert_eq!(record.common_name.as_deref(), Some("Neem"));
        assert_eq!(record.yoruba.as_deref(), Some("Dongoyaro"));
        assert!(!record.native_to_nigeria);
    }

    #[test]
    fn test_parse_local_name_rejects_non_json() {
        assert!(parse_local_name_json("no idea", "Moringa oleifera").is_err());
    }

    #[test]
    fn test_name_lookup_prompt() {
        let prompt = NameLookupPrompt::new("Moringa oleifera");
        assert!(prompt.generate().contains("Moringa oleifera"));
        assert!(prompt.generate().contains("isNativeToNigeria"));
        assert!(prompt.system_prompt().unwrap().contains("JSON"));
    }
}
