//! Descriptive linguistic features reported alongside the sentiment verdict.

use crate::Lexicon;
use layered_sentiment_document::Document;
use serde::Serialize;
use std::fmt;

const TOP_TAGS: usize = 5;
const MAX_RELATIONS: usize = 8;
const RELATION_DEPS: &[&str] = &["nsubj", "dobj", "nmod", "amod"];

/// A tag and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

impl fmt::Display for TagCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tag, self.count)
    }
}

/// Token-level facts about one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinguisticProfile {
    /// Content lemmas longer than two characters, space separated
    pub lemmatized: String,
    pub positive_terms: Vec<String>,
    pub negative_terms: Vec<String>,
    /// `"text (LABEL)"`
    pub entities: Vec<String>,
    pub sentence_count: usize,
    /// Non-space tokens
    pub token_count: usize,
    pub pos_stats: Vec<TagCount>,
    pub dep_stats: Vec<TagCount>,
    /// `head->dep->dependent`
    pub relations: Vec<String>,
}

impl LinguisticProfile {
    pub fn from_document(doc: &Document, lexicon: &Lexicon) -> Self {
        let tokens = doc.tokens();

        let lemmatized = tokens
            .iter()
            .filter(|t| !t.is_stop && !t.is_punct && !t.is_space && t.lemma.chars().count() > 2)
            .map(|t| t.lemma.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let positive_terms = tokens
            .iter()
            .filter(|t| !t.is_stop && lexicon.is_positive(&t.lemma))
            .map(|t| t.text.clone())
            .collect();
        let negative_terms = tokens
            .iter()
            .filter(|t| !t.is_stop && lexicon.is_negative(&t.lemma))
            .map(|t| t.text.clone())
            .collect();

        let entities = doc
            .entities()
            .iter()
            .map(|e| format!("{} ({})", e.text, e.label))
            .collect();

        let relations = tokens
            .iter()
            .filter(|t| !t.is_stop && RELATION_DEPS.contains(&t.dep.as_str()))
            .take(MAX_RELATIONS)
            .map(|t| {
                // A sentence root is its own head.
                let head = t
                    .head
                    .and_then(|id| doc.token(id))
                    .map_or(t.text.as_str(), |h| h.text.as_str());
                format!("{}->{}->{}", head, t.dep, t.text)
            })
            .collect();

        Self {
            lemmatized,
            positive_terms,
            negative_terms,
            entities,
            sentence_count: doc.sentence_count(),
            token_count: doc.non_space_count(),
            pos_stats: top_tags(tokens.iter().filter(|t| !t.is_space).map(|t| t.pos.as_str())),
            dep_stats: top_tags(tokens.iter().filter(|t| !t.is_space).map(|t| t.dep.as_str())),
            relations,
        }
    }
}

/// The most frequent tags, ties kept in first-seen order.
fn top_tags<'a>(tags: impl Iterator<Item = &'a str>) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for tag in tags {
        match counts.iter_mut().find(|c| c.tag == tag) {
            Some(count) => count.count += 1,
            None => counts.push(TagCount {
                tag: tag.to_string(),
                count: 1,
            }),
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_TAGS);
    counts
}

/// `"A:3, B:1"`
pub fn format_tag_counts(counts: &[TagCount]) -> String {
    counts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
