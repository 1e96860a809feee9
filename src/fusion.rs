//! Decision fusion of the lexical and external signals.
//!
//! An ordered cascade; the first rule that matches decides:
//!
//! 1. both signals agree
//! 2. the classifier is confident (`conf >= 0.55`) and polar
//! 3. the lexical score is strong (`|score| >= 0.25`) and polar
//! 4. the classifier is moderately confident (`conf > 0.50`) and polar
//! 5. the lexical score is weak but polar (`|score| > 0.10`)
//! 6. neutral

use crate::{Category, CATEGORY_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cut-offs used by the cascade and by lexical categorization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FusionThresholds {
    /// Lexical score boundary between neutral and polar
    pub category: f64,
    pub external_strong: f64,
    pub external_moderate: f64,
    pub lexical_strong: f64,
    pub lexical_weak: f64,
}

impl Default for FusionThresholds {
    fn default() -> Self {
        Self {
            category: CATEGORY_THRESHOLD,
            external_strong: 0.55,
            external_moderate: 0.50,
            lexical_strong: 0.25,
            lexical_weak: 0.10,
        }
    }
}

/// The cascade rule that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionRule {
    Agreement,
    ExternalStrong,
    LexicalStrong,
    ExternalModerate,
    LexicalWeak,
    Neutral,
}

impl FusionRule {
    pub const ALL: [FusionRule; 6] = [
        FusionRule::Agreement,
        FusionRule::ExternalStrong,
        FusionRule::LexicalStrong,
        FusionRule::ExternalModerate,
        FusionRule::LexicalWeak,
        FusionRule::Neutral,
    ];

    /// Position in the cascade, 1 to 6.
    pub fn number(self) -> u8 {
        match self {
            FusionRule::Agreement => 1,
            FusionRule::ExternalStrong => 2,
            FusionRule::LexicalStrong => 3,
            FusionRule::ExternalModerate => 4,
            FusionRule::LexicalWeak => 5,
            FusionRule::Neutral => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.number() == number)
    }

    pub fn label(self) -> &'static str {
        match self {
            FusionRule::Agreement => "agreement",
            FusionRule::ExternalStrong => "confident classifier",
            FusionRule::LexicalStrong => "strong lexicon",
            FusionRule::ExternalModerate => "moderate classifier",
            FusionRule::LexicalWeak => "weak lexicon",
            FusionRule::Neutral => "weak or conflicting signals",
        }
    }
}

impl fmt::Display for FusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({})", self.number(), self.label())
    }
}

/// Outcome of [`DecisionFusion::fuse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionDecision {
    pub category: Category,
    pub rule: FusionRule,
    /// Names the rule and both raw signal values
    pub justification: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionFusion {
    thresholds: FusionThresholds,
}

impl DecisionFusion {
    pub fn new(thresholds: FusionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &FusionThresholds {
        &self.thresholds
    }

    /// Run the cascade. Exactly one rule fires for any input.
    pub fn fuse(
        &self,
        lexical_score: f64,
        lexical_category: Category,
        external_category: Category,
        external_confidence: f64,
    ) -> FusionDecision {
        let t = &self.thresholds;
        let (rule, category) = if lexical_category == external_category {
            (FusionRule::Agreement, lexical_category)
        } else if external_confidence >= t.external_strong && !external_category.is_neutral() {
            (FusionRule::ExternalStrong, external_category)
        } else if lexical_score.abs() >= t.lexical_strong && !lexical_category.is_neutral() {
            (FusionRule::LexicalStrong, lexical_category)
        } else if external_confidence > t.external_moderate && !external_category.is_neutral() {
            (FusionRule::ExternalModerate, external_category)
        } else if lexical_score.abs() > t.lexical_weak && !lexical_category.is_neutral() {
            (FusionRule::LexicalWeak, lexical_category)
        } else {
            (FusionRule::Neutral, Category::Neutral)
        };

        let justification = format!(
            "{}: {} (lexical {} {:.3}, external {} {:.2})",
            rule, category, lexical_category, lexical_score, external_category, external_confidence
        );

        FusionDecision {
            category,
            rule,
            justification,
        }
    }
}
