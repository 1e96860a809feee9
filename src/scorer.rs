//! Lexicon-based scoring with negation and intensifiers.
//!
//! Each lexicon hit contributes a fixed weight, flipped and weakened under
//! negation and multiplied when an intensifier is attached to it:
//!
//! | lemma    | plain | negated |
//! |----------|-------|---------|
//! | positive | +0.7  | −0.5    |
//! | negative | −0.8  | +0.4    |
//!
//! The sum is normalized by the square root of the non-space token count,
//! scaled, and clamped to `[-1, 1]`.

use crate::negation::{NegationCue, NegationScopeResolver};
use crate::{Category, Lexicon, Polarity, CATEGORY_THRESHOLD};
use layered_sentiment_document::{TokenId, TokenView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contribution weights and normalization scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringWeights {
    pub positive: f64,
    pub negated_positive: f64,
    pub negative: f64,
    pub negated_negative: f64,
    /// Multiplier applied when a child or the head is an intensifier
    pub intensifier: f64,
    /// Applied after square-root normalization
    pub scale: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            positive: 0.7,
            negated_positive: -0.5,
            negative: -0.8,
            negated_negative: 0.4,
            intensifier: 1.4,
            scale: 1.8,
        }
    }
}

/// Signed lexical score and the category derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LexicalSignal {
    pub score: f64,
    pub category: Category,
}

impl LexicalSignal {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            category: Category::Neutral,
        }
    }
}

/// How a lexicon hit was counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContributionKind {
    Positive,
    NegatedPositive,
    Negative,
    NegatedNegative,
}

impl ContributionKind {
    fn new(polarity: Polarity, negated: bool) -> Self {
        match (polarity, negated) {
            (Polarity::Positive, false) => ContributionKind::Positive,
            (Polarity::Positive, true) => ContributionKind::NegatedPositive,
            (Polarity::Negative, false) => ContributionKind::Negative,
            (Polarity::Negative, true) => ContributionKind::NegatedNegative,
        }
    }
}

/// One scored lexicon hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub token: TokenId,
    pub kind: ContributionKind,
    pub negation: Option<NegationCue>,
    pub intensified: bool,
    pub value: f64,
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:+.2})", self.kind, self.value)?;
        if self.intensified {
            f.write_str("×")?;
        }
        Ok(())
    }
}

/// Full account of how a view was scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexicalBreakdown {
    pub contributions: Vec<Contribution>,
    pub raw_sum: f64,
    /// Non-space tokens in the view
    pub token_count: usize,
    pub score: f64,
}

/// Scores token views against a [`Lexicon`].
#[derive(Debug, Clone, Copy)]
pub struct LexicalScorer<'l> {
    lexicon: &'l Lexicon,
    weights: ScoringWeights,
    category_threshold: f64,
}

impl<'l> LexicalScorer<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self {
            lexicon,
            weights: ScoringWeights::default(),
            category_threshold: CATEGORY_THRESHOLD,
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_category_threshold(mut self, threshold: f64) -> Self {
        self.category_threshold = threshold;
        self
    }

    /// Score in `[-1, 1]` for a document or sentence view.
    pub fn score(&self, view: &TokenView<'_>) -> f64 {
        self.explain(view).score
    }

    /// Score plus category.
    pub fn signal(&self, view: &TokenView<'_>) -> LexicalSignal {
        let score = self.score(view);
        LexicalSignal {
            score,
            category: self.category(score),
        }
    }

    pub fn category(&self, score: f64) -> Category {
        Category::from_score(score, self.category_threshold)
    }

    /// Score a view and keep every contribution.
    ///
    /// Negation and intensifiers are always resolved inside the hit's own
    /// sentence, even when `view` spans the whole document.
    pub fn explain(&self, view: &TokenView<'_>) -> LexicalBreakdown {
        let resolver = NegationScopeResolver::new(self.lexicon);
        let mut contributions = Vec::new();

        for (id, token) in view.iter() {
            let polarity = match self.lexicon.polarity(&token.lemma) {
                Some(polarity) => polarity,
                None => continue,
            };
            let sentence = view.sentence_of(id).unwrap_or(*view);

            let negation = resolver.negation_cue(id, &sentence);
            let intensified = sentence
                .children_of(token)
                .chain(sentence.head_of(token))
                .any(|t| self.lexicon.is_intensifier(&t.lemma));
            let multiplier = if intensified {
                self.weights.intensifier
            } else {
                1.0
            };

            let kind = ContributionKind::new(polarity, negation.is_some());
            let base = match kind {
                ContributionKind::Positive => self.weights.positive,
                ContributionKind::NegatedPositive => self.weights.negated_positive,
                ContributionKind::Negative => self.weights.negative,
                ContributionKind::NegatedNegative => self.weights.negated_negative,
            };

            contributions.push(Contribution {
                token: id,
                kind,
                negation,
                intensified,
                value: base * multiplier,
            });
        }

        let raw_sum: f64 = contributions.iter().map(|c| c.value).sum();
        let token_count = view.non_space_count();
        let norm = (token_count.max(1) as f64).sqrt().max(1.0);
        let score = raw_sum / norm * self.weights.scale;
        // NaN survives clamp
        let score = if score.is_nan() { 0.0 } else { score.clamp(-1.0, 1.0) };

        LexicalBreakdown {
            contributions,
            raw_sum,
            token_count,
            score,
        }
    }
}
