//! efetch XML → article records.

use crate::error::{LiteratureError, LiteratureResult};
use ewe_core::types::{ArticleRecord, NO_TITLE};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashSet;

/// Authors kept per record.
pub const MAX_AUTHORS: usize = 5;

/// Parse a `PubmedArticleSet` document.
///
/// A document without `PubmedArticle` elements yields an empty list.
/// Malformed XML is logged and also yields an empty list.
pub fn parse_article_set(xml: &str) -> Vec<ArticleRecord> {
    match try_parse_article_set(xml) {
        Ok(articles) => articles,
        Err(e) => {
            tracing::error!(error = %e, "failed to parse fetch XML");
            Vec::new()
        }
    }
}

/// Like [`parse_article_set`], but reports malformed XML to the caller.
pub fn try_parse_article_set(xml: &str) -> LiteratureResult<Vec<ArticleRecord>> {
    // efetch responses carry a DOCTYPE.
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|e| LiteratureError::MalformedXml(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for node in doc.descendants().filter(|n| n.has_tag_name("PubmedArticle")) {
        match parse_article(node) {
            Some(article) => {
                if seen.insert(article.id.clone()) {
                    articles.push(article);
                } else {
                    tracing::debug!(id = %article.id, "duplicate record in fetch batch; keeping first");
                }
            }
            None => tracing::warn!("PubmedArticle without a PMID skipped"),
        }
    }

    tracing::debug!(count = articles.len(), "parsed fetch XML");
    Ok(articles)
}

fn parse_article(node: Node) -> Option<ArticleRecord> {
    let citation = child(node, "MedlineCitation")?;
    let id = text_of(child(citation, "PMID")?);
    if id.is_empty() {
        return None;
    }

    let article = match child(citation, "Article") {
        Some(article) => article,
        None => return Some(ArticleRecord::new(id, NO_TITLE)),
    };

    let title = child(article, "ArticleTitle")
        .map(text_of)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let journal = child(article, "Journal");
    let journal_title = journal
        .and_then(|j| child(j, "Title"))
        .map(text_of)
        .unwrap_or_default();
    let pub_date = journal
        .and_then(|j| child(j, "JournalIssue"))
        .and_then(|i| child(i, "PubDate"))
        .map(publication_date)
        .unwrap_or_default();

    Some(
        ArticleRecord::new(id, title)
            .with_abstract(abstract_text(article))
            .with_authors(authors(article))
            .with_journal(journal_title)
            .with_pub_date(pub_date),
    )
}

/// All `AbstractText` segments, labeled ones prefixed with `**LABEL:**`.
fn abstract_text(article: Node) -> String {
    let Some(abstract_node) = child(article, "Abstract") else {
        return String::new();
    };

    abstract_node
        .children()
        .filter(|n| n.has_tag_name("AbstractText"))
        .filter_map(|segment| {
            let text = text_of(segment);
            if text.is_empty() {
                return None;
            }
            Some(match segment.attribute("Label") {
                Some(label) if !label.trim().is_empty() => {
                    format!("**{}:** {}", label.trim(), text)
                }
                _ => text,
            })
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn authors(article: Node) -> Vec<String> {
    let Some(list) = child(article, "AuthorList") else {
        return Vec::new();
    };

    list.children()
        .filter(|n| n.has_tag_name("Author"))
        .filter_map(|author| {
            let last = child(author, "LastName").map(text_of).unwrap_or_default();
            if last.is_empty() {
                return child(author, "CollectiveName")
                    .map(text_of)
                    .filter(|name| !name.is_empty());
            }
            let initials = child(author, "Initials").map(text_of).unwrap_or_default();
            Some(format!("{} {}", last, initials).trim().to_string())
        })
        .take(MAX_AUTHORS)
        .collect()
}

/// `"<Month> <Year>"`, trimmed; falls back to `MedlineDate`.
fn publication_date(pub_date: Node) -> String {
    let month = child(pub_date, "Month").map(text_of).unwrap_or_default();
    let year = child(pub_date, "Year").map(text_of).unwrap_or_default();
    let date = format!("{} {}", month, year).trim().to_string();
    if !date.is_empty() {
        return date;
    }
    child(pub_date, "MedlineDate").map(text_of).unwrap_or_default()
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// Text of `node` and every descendant, so inline markup is flattened.
fn text_of(node: Node) -> String {
    let raw: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">31234567</PMID>
      <Article PubModel="Print">
        <Journal>
          <Title>Journal of ethnopharmacology</Title>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2020</Year><Month>Mar</Month></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Antiplasmodial activity of <i>Vernonia amygdalina</i> leaf extracts.</ArticleTitle>
        <Abstract>
          <AbstractText Label="BACKGROUND" NlmCategory="BACKGROUND">Malaria remains endemic.</AbstractText>
          <AbstractText Label="RESULTS" NlmCategory="RESULTS">Extracts reduced parasitaemia by 60%.</AbstractText>
        </Abstract>
        <AuthorList CompleteYN="Y">
          <Author><LastName>Adebayo</LastName><Initials>JO</Initials></Author>
          <Author><LastName>Okeke</LastName><Initials>C</Initials></Author>
          <Author><LastName>Bello</LastName><Initials>A</Initials></Author>
          <Author><LastName>Eze</LastName><Initials>N</Initials></Author>
          <Author><LastName>Musa</LastName><Initials>I</Initials></Author>
          <Author><LastName>Obi</LastName><Initials>K</Initials></Author>
        </AuthorList>
      </Article>
      <CommentsCorrectionsList>
        <CommentsCorrections RefType="Cites"><PMID Version="1">11111111</PMID></CommentsCorrections>
      </CommentsCorrectionsList>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation>
      <PMID Version="1">29876543</PMID>
      <Article>
        <Journal>
          <Title>Afr J Tradit Complement Altern Med</Title>
          <JournalIssue><PubDate><MedlineDate>2017 Nov-Dec</MedlineDate></PubDate></JournalIssue>
        </Journal>
        <Abstract><AbstractText>Unlabeled single segment.</AbstractText></Abstract>
        <AuthorList><Author><CollectiveName>West African Herbal Study Group</CollectiveName></Author></AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn parses_full_record() {
        let articles = parse_article_set(SAMPLE);
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.id, "31234567");
        assert_eq!(
            first.title,
            "Antiplasmodial activity of Vernonia amygdalina leaf extracts."
        );
        assert_eq!(
            first.abstract_text,
            "**BACKGROUND:** Malaria remains endemic.\n\n**RESULTS:** Extracts reduced parasitaemia by 60%."
        );
        assert_eq!(first.authors.len(), MAX_AUTHORS);
        assert_eq!(first.authors[0], "Adebayo JO");
        assert!(!first.authors.contains(&"Obi K".to_string()));
        assert_eq!(first.journal, "Journal of ethnopharmacology");
        assert_eq!(first.pub_date, "Mar 2020");
    }

    #[test]
    fn defaults_and_fallbacks() {
        let articles = parse_article_set(SAMPLE);
        let second = &articles[1];
        assert_eq!(second.title, NO_TITLE);
        assert_eq!(second.abstract_text, "Unlabeled single segment.");
        assert_eq!(second.authors, vec!["West African Herbal Study Group"]);
        assert_eq!(second.pub_date, "2017 Nov-Dec");
    }

    #[test]
    fn year_only_date_is_trimmed() {
        let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation><PMID>1</PMID>
            <Article><Journal><JournalIssue><PubDate><Year>2019</Year></PubDate></JournalIssue></Journal>
            <ArticleTitle>T</ArticleTitle></Article></MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
        let articles = parse_article_set(xml);
        assert_eq!(articles[0].pub_date, "2019");
        assert_eq!(articles[0].abstract_text, "");
    }

    #[test]
    fn zero_records_is_empty_not_error() {
        let xml = r#"<?xml version="1.0" ?><PubmedArticleSet></PubmedArticleSet>"#;
        assert!(try_parse_article_set(xml).unwrap().is_empty());
        assert!(parse_article_set(xml).is_empty());
    }

    #[test]
    fn malformed_xml_yields_empty_list() {
        let xml = "<PubmedArticleSet><PubmedArticle><MedlineCitation>";
        assert!(matches!(
            try_parse_article_set(xml),
            Err(LiteratureError::MalformedXml(_))
        ));
        assert!(parse_article_set(xml).is_empty());
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let record = |title: &str| {
            format!(
                "<PubmedArticle><MedlineCitation><PMID>7</PMID><Article><ArticleTitle>{}</ArticleTitle></Article></MedlineCitation></PubmedArticle>",
                title
            )
        };
        let xml = format!(
            "<PubmedArticleSet>{}{}</PubmedArticleSet>",
            record("first"),
            record("second")
        );
        let articles = parse_article_set(&xml);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "first");
    }
}
