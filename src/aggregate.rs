//! Per-sentence breakdowns and the weighted sentence aggregate.

use crate::{Category, ExternalSignal, LexicalScorer};
use layered_sentiment_document::Document;
use serde::Serialize;

/// Sentences whose trimmed text is shorter than this are left out of summaries.
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 5;

/// Lexical score of one sentence, computed on that sentence alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceScore {
    /// 1-based ordinal within the document
    pub number: usize,
    pub text: String,
    pub score: f64,
    pub category: Category,
}

/// One sentence judged by both signals, input to [`SentenceAggregator::aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceJudgment {
    pub text: String,
    pub lexical_score: f64,
    pub external: ExternalSignal,
}

impl SentenceJudgment {
    /// Whitespace-separated word count, used as the sentence weight.
    pub fn weight(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Sentence judgments collapsed into one document-level signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedAggregate {
    /// Word-weighted mean of sentence lexical scores
    pub score: f64,
    /// Category with the largest word-weighted external confidence
    pub category: Category,
    pub confidence: f64,
}

impl WeightedAggregate {
    fn empty() -> Self {
        Self {
            score: 0.0,
            category: Category::Neutral,
            confidence: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SentenceAggregator<'l> {
    scorer: LexicalScorer<'l>,
    min_chars: usize,
}

impl<'l> SentenceAggregator<'l> {
    pub fn new(scorer: LexicalScorer<'l>) -> Self {
        Self {
            scorer,
            min_chars: DEFAULT_MIN_SENTENCE_CHARS,
        }
    }

    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Score every sentence long enough to report, each on its own view.
    ///
    /// Skipped sentences still consume their ordinal number.
    pub fn breakdown(&self, doc: &Document) -> Vec<SentenceScore> {
        (0..doc.sentence_count())
            .filter_map(|index| {
                let text = doc.sentence_text(index)?;
                let text = text.trim();
                if text.chars().count() < self.min_chars {
                    return None;
                }
                let view = doc.sentence_view(index)?;
                let score = self.scorer.score(&view);
                Some(SentenceScore {
                    number: index + 1,
                    text: text.to_string(),
                    score,
                    category: self.scorer.category(score),
                })
            })
            .collect()
    }

    /// `S1:poz(+0.51) | S2:neg(-0.45)`
    pub fn summary(&self, doc: &Document) -> String {
        format_summary(&self.breakdown(doc))
    }

    /// Collapse sentence judgments into one weighted signal.
    ///
    /// An empty slice, or one with no words at all, yields `(0.0, neutral, 0.5)`.
    pub fn aggregate(&self, sentences: &[SentenceJudgment]) -> WeightedAggregate {
        let mut total_weight = 0.0;
        let mut weighted_score = 0.0;
        // Insertion ordered so ties go to the category that accumulated first.
        let mut masses: Vec<(Category, f64)> = Vec::new();

        for sentence in sentences {
            let weight = sentence.weight() as f64;
            total_weight += weight;
            weighted_score += sentence.lexical_score * weight;

            let mass = sentence.external.confidence * weight;
            match masses.iter_mut().find(|(c, _)| *c == sentence.external.value) {
                Some((_, total)) => *total += mass,
                None => masses.push((sentence.external.value, mass)),
            }
        }

        if total_weight <= 0.0 {
            return WeightedAggregate::empty();
        }

        let mut dominant: Option<(Category, f64)> = None;
        for &(category, mass) in &masses {
            if dominant.map_or(true, |(_, best)| mass > best) {
                dominant = Some((category, mass));
            }
        }
        let (category, mass) = dominant.unwrap_or((Category::Neutral, 0.0));

        WeightedAggregate {
            score: weighted_score / total_weight,
            category,
            confidence: (mass / total_weight).min(1.0),
        }
    }
}

pub fn format_summary(sentences: &[SentenceScore]) -> String {
    sentences
        .iter()
        .map(|s| format!("S{}:{}({:+.2})", s.number, s.category.short_label(), s.score))
        .collect::<Vec<_>>()
        .join(" | ")
}
