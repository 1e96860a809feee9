//! The per-row verdict handed to reporting.

use crate::{Category, FusionRule, HybridCategory, LinguisticProfile, ScoreSource};
use serde::Serialize;

const FAILED_TEXT_CHARS: usize = 200;
const FAILED_REASON_CHARS: usize = 100;

/// Round to four decimals for reporting.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn prefix_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Everything reported for one input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridResult {
    pub text: String,
    pub lexical_category: Category,
    /// Rounded to 4 decimals
    pub lexical_score: f64,
    pub external_category: Category,
    /// Rounded to 4 decimals
    pub external_confidence: f64,
    pub external_source: ScoreSource,
    pub hybrid_category: HybridCategory,
    /// `None` only for failed rows
    pub rule: Option<FusionRule>,
    pub justification: String,
    /// `S1:poz(+0.51) | S2:sem(+0.00)`
    pub sentence_summary: String,
    #[serde(flatten)]
    pub profile: LinguisticProfile,
}

impl HybridResult {
    /// The row reported when a document could not be processed.
    pub fn failed(text: &str, error: &str) -> Self {
        Self {
            text: prefix_chars(text, FAILED_TEXT_CHARS),
            lexical_category: Category::Neutral,
            lexical_score: 0.0,
            external_category: Category::Neutral,
            external_confidence: 0.5,
            external_source: ScoreSource::Fallback {
                reason: "document failed".to_string(),
            },
            hybrid_category: HybridCategory::Error,
            rule: None,
            justification: format!("error: {}", prefix_chars(error, FAILED_REASON_CHARS)),
            sentence_summary: String::new(),
            profile: LinguisticProfile::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.hybrid_category.is_error()
    }
}
