#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Hybrid sentiment classification for short free-text rows.
//!
//! Two independent signals are fused into one audited verdict:
//!
//! - a lexicon score computed over parsed tokens, with dependency-aware
//!   negation and intensifiers
//! - the answer of an external text classifier
//!
//! ## Scoring
//!
//! - [`Lexicon`] - Positive, negative, intensifier and negator word sets
//! - [`NegationScopeResolver`] - Child, head and look-back window negation cues
//! - [`LexicalScorer`] - Signed, square-root normalized score in `[-1, 1]`
//! - [`SentenceAggregator`] - Per-sentence breakdown and weighted aggregate
//!
//! ## Fusion
//!
//! - [`interpret`] - Semantic or ordinal classifier labels to an [`ExternalSignal`]
//! - [`BatchAligner`] - One external signal per input, whatever fails
//! - [`DecisionFusion`] - The six-rule cascade with a justification per verdict
//!
//! ## Running
//!
//! [`SentimentEngine`] holds the lexicon, parser and classifier handles and
//! yields one [`HybridResult`] per input row, lazily and in order.
//!
//! ## Example
//!
//! ```
//! use layered_sentiment::{Category, SentimentEngine};
//!
//! let engine = SentimentEngine::lexicon_only();
//! let result = engine.analyze("Ez egy nagyon jó termék.");
//! assert_eq!(result.lexical_category, Category::Positive);
//! ```

mod aggregate;
mod batch;
mod category;
mod classifier;
mod clean;
mod config;
mod display;
mod engine;
mod errors;
mod fusion;
mod lexicon;
mod linguistics;
mod negation;
mod result;
mod scored;
mod scorer;
mod signal;
mod stats;

pub use aggregate::{
    format_summary, SentenceAggregator, SentenceJudgment, SentenceScore, WeightedAggregate,
    DEFAULT_MIN_SENTENCE_CHARS,
};
pub use batch::{fallback_signal, BatchAligner, BatchConfig, ChunkFailurePolicy};
pub use category::{Category, HybridCategory, CATEGORY_THRESHOLD};
pub use classifier::{truncate_chars, Classifier, FixedClassifier, MAX_INPUT_CHARS};
pub use clean::clean_text;
pub use config::{EngineConfig, LexiconConfig, OrdinalConfig, SentenceConfig};
pub use display::SentenceDisplay;
pub use engine::{Analyses, SentenceAnalysis, SentimentEngine, SentimentEngineBuilder};
pub use errors::{Result, SentimentError};
pub use fusion::{DecisionFusion, FusionDecision, FusionRule, FusionThresholds};
pub use lexicon::{Lexicon, LexiconBuilder, Polarity, DEFAULT_NEGATION_WINDOW};
pub use linguistics::{format_tag_counts, LinguisticProfile, TagCount};
pub use negation::{NegationCue, NegationRule, NegationScopeResolver};
pub use result::{round4, HybridResult};
pub use scored::{ScoreSource, Scored};
pub use scorer::{
    Contribution, ContributionKind, LexicalBreakdown, LexicalScorer, LexicalSignal,
    ScoringWeights,
};
pub use signal::{
    interpret, ExternalSignal, OrdinalPolicy, RawPayload, RawPrediction, NEUTRAL_CONFIDENCE,
};
pub use stats::RunStatistics;

// The document model is part of the public interface.
pub use layered_sentiment_document as document;
pub use layered_sentiment_document::{Document, Parser, PlainTextParser, ProcessError};

#[cfg(test)]
mod tests {
    mod batch_isolation;
    mod fusion_properties;
    mod scenarios;
}
