//! Engine configuration, loaded from TOML.
//!
//! Every section and field is optional; omitted values take the defaults
//! the scoring and fusion rules are calibrated for.
//!
//! ```toml
//! [thresholds]
//! external_strong = 0.6
//!
//! [batch]
//! chunk_size = 32
//! chunk_failure = "default"
//!
//! [lexicon]
//! positive = ["pazar"]
//! ```

use crate::errors::{Result, SentimentError};
use crate::{
    BatchConfig, FusionThresholds, Lexicon, LexiconBuilder, OrdinalPolicy, ScoringWeights,
    DEFAULT_MIN_SENTENCE_CHARS, DEFAULT_NEGATION_WINDOW,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub scoring: ScoringWeights,
    pub thresholds: FusionThresholds,
    pub batch: BatchConfig,
    pub sentences: SentenceConfig,
    pub ordinal: OrdinalConfig,
    pub lexicon: LexiconConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SentenceConfig {
    /// Shorter sentences (trimmed, in characters) are left out of summaries
    pub min_chars: usize,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_SENTENCE_CHARS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrdinalConfig {
    pub policy: OrdinalPolicy,
}

/// Additions to, or a replacement for, the built-in lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconConfig {
    /// Start from the built-in Hungarian lists
    pub extend_builtin: bool,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub intensifiers: Vec<String>,
    pub negators: Vec<String>,
    pub negation_window: usize,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            extend_builtin: true,
            positive: Vec::new(),
            negative: Vec::new(),
            intensifiers: Vec::new(),
            negators: Vec::new(),
            negation_window: DEFAULT_NEGATION_WINDOW,
        }
    }
}

impl LexiconConfig {
    pub fn build(&self) -> Lexicon {
        let builder = if self.extend_builtin {
            LexiconBuilder::hungarian()
        } else {
            Lexicon::builder()
        };
        builder
            .positive(&self.positive)
            .negative(&self.negative)
            .intensifiers(&self.intensifiers)
            .negators(&self.negators)
            .negation_window(self.negation_window)
            .build()
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| SentimentError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SentimentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(SentimentError::Config { message });

        if self.batch.chunk_size == 0 {
            return invalid("batch.chunk_size must be at least 1".to_string());
        }
        if self.batch.max_chars == 0 {
            return invalid("batch.max_chars must be at least 1".to_string());
        }
        let t = &self.thresholds;
        for (name, value) in [
            ("category", t.category),
            ("external_strong", t.external_strong),
            ("external_moderate", t.external_moderate),
            ("lexical_strong", t.lexical_strong),
            ("lexical_weak", t.lexical_weak),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("thresholds.{} must be within [0, 1], got {}", name, value));
            }
        }
        let w = &self.scoring;
        for (name, value) in [
            ("positive", w.positive),
            ("negated_positive", w.negated_positive),
            ("negative", w.negative),
            ("negated_negative", w.negated_negative),
            ("intensifier", w.intensifier),
        ] {
            if !value.is_finite() {
                return invalid(format!("scoring.{} must be finite, got {}", name, value));
            }
        }
        if self.scoring.scale <= 0.0 || !self.scoring.scale.is_finite() {
            return invalid(format!("scoring.scale must be positive, got {}", self.scoring.scale));
        }
        Ok(())
    }
}
