//! `Scored<T>` infrastructure for confidence-carrying signals.
//!
//! The [`Scored<T>`] wrapper pairs a value with a confidence in `[0.0, 1.0]`
//! and records where that confidence came from via [`ScoreSource`]:
//! - An external classifier model
//! - A fallback substituted because the classifier failed or was absent
//! - A combination of other scores

use serde::Serialize;
use std::fmt;

/// A value with an associated confidence score.
///
/// # Example
/// ```
/// use layered_sentiment::{Category, Scored};
///
/// let signal = Scored::classified(Category::Positive, 0.91, "hubert-hu");
/// assert!(!signal.is_fallback());
///
/// let missing = Scored::fallback(Category::Neutral, 0.5, "classifier unavailable");
/// assert!(missing.is_fallback());
/// ```
#[derive(Clone, Serialize)]
pub struct Scored<T> {
    /// The actual value
    pub value: T,
    /// Confidence score from 0.0 to 1.0
    pub confidence: f64,
    /// Where this score came from
    pub source: ScoreSource,
}

/// The source of a confidence score.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreSource {
    /// Score reported by an external classifier
    Classifier {
        /// Model identifier
        model: String,
    },
    /// Default substituted for a missing or unusable classifier answer
    Fallback {
        /// Why the default was used
        reason: String,
    },
    /// Score derived from combining other scores
    Derived,
}

impl<T> Scored<T> {
    /// Create a new scored value with explicit confidence and source.
    ///
    /// Confidence is clamped to `[0.0, 1.0]`; NaN becomes 0.0.
    pub fn new(value: T, confidence: f64, source: ScoreSource) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            value,
            confidence,
            source,
        }
    }

    /// Create a scored value reported by a classifier model.
    pub fn classified(value: T, confidence: f64, model: &str) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::Classifier {
                model: model.to_string(),
            },
        )
    }

    /// Create a fallback value standing in for a classifier answer.
    pub fn fallback(value: T, confidence: f64, reason: impl Into<String>) -> Self {
        Self::new(
            value,
            confidence,
            ScoreSource::Fallback {
                reason: reason.into(),
            },
        )
    }

    /// Create a derived scored value (from combining other scores).
    pub fn derived(value: T, confidence: f64) -> Self {
        Self::new(value, confidence, ScoreSource::Derived)
    }

    /// Returns true if this value is a substituted default.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ScoreSource::Fallback { .. })
    }
}

impl<T: fmt::Debug> fmt::Debug for Scored<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compact format for snapshot tests: Scored(value, conf: 0.85)
        write!(f, "Scored({:?}, conf: {:.2})", self.value, self.confidence)
    }
}

impl<T: PartialEq> PartialEq for Scored<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && (self.confidence - other.confidence).abs() < f64::EPSILON
            && self.source == other.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_score() {
        let scored = Scored::derived("test", 0.75);
        assert_eq!(scored.confidence, 0.75);
        assert!(!scored.is_fallback());
        assert_eq!(scored.source, ScoreSource::Derived);
    }

    #[test]
    fn test_fallback_score() {
        let scored = Scored::fallback("x", 0.5, "timeout");
        assert!(scored.is_fallback());
        assert_eq!(
            scored.source,
            ScoreSource::Fallback {
                reason: "timeout".to_string()
            }
        );
    }

    #[test]
    fn test_confidence_clamping() {
        let high = Scored::derived("test", 1.5);
        assert_eq!(high.confidence, 1.0);

        let low = Scored::derived("test", -0.5);
        assert_eq!(low.confidence, 0.0);

        let nan = Scored::derived("test", f64::NAN);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn test_debug_format() {
        let scored = Scored::classified("positive", 0.85, "m");
        let debug = format!("{:?}", scored);
        assert_eq!(debug, r#"Scored("positive", conf: 0.85)"#);
    }

    #[test]
    fn test_source_serializes_tagged() {
        let scored = Scored::classified(1u8, 0.5, "hubert");
        let json = serde_json::to_string(&scored).unwrap();
        assert_eq!(
            json,
            r#"{"value":1,"confidence":0.5,"source":{"kind":"classifier","model":"hubert"}}"#
        );
    }
}
