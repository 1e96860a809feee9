//! The closed sentiment categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default boundary between neutral and polar lexical scores.
pub const CATEGORY_THRESHOLD: f64 = 0.10;

/// Sentiment category of a lexical or external signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
}

impl Category {
    /// Map a lexical score to a category.
    ///
    /// The neutral band is closed: a score of exactly `±threshold` is neutral.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold {
            Category::Positive
        } else if score < -threshold {
            Category::Negative
        } else {
            Category::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
        }
    }

    /// Three-letter tag used in per-sentence summaries.
    pub fn short_label(self) -> &'static str {
        match self {
            Category::Positive => "poz",
            Category::Negative => "neg",
            Category::Neutral => "sem",
        }
    }

    pub fn is_neutral(self) -> bool {
        self == Category::Neutral
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final verdict of a [`HybridResult`](crate::HybridResult).
///
/// `Error` marks a row whose processing failed; it never comes out of the
/// fusion cascade itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HybridCategory {
    Positive,
    Negative,
    Neutral,
    Error,
}

impl HybridCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            HybridCategory::Positive => "positive",
            HybridCategory::Negative => "negative",
            HybridCategory::Neutral => "neutral",
            HybridCategory::Error => "error",
        }
    }

    /// The sentiment category, or `None` for failed rows.
    pub fn category(self) -> Option<Category> {
        match self {
            HybridCategory::Positive => Some(Category::Positive),
            HybridCategory::Negative => Some(Category::Negative),
            HybridCategory::Neutral => Some(Category::Neutral),
            HybridCategory::Error => None,
        }
    }

    pub fn is_error(self) -> bool {
        self == HybridCategory::Error
    }
}

impl From<Category> for HybridCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Positive => HybridCategory::Positive,
            Category::Negative => HybridCategory::Negative,
            Category::Neutral => HybridCategory::Neutral,
        }
    }
}

impl fmt::Display for HybridCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_is_neutral() {
        assert_eq!(Category::from_score(0.10, CATEGORY_THRESHOLD), Category::Neutral);
        assert_eq!(Category::from_score(-0.10, CATEGORY_THRESHOLD), Category::Neutral);
        assert_eq!(Category::from_score(0.0, CATEGORY_THRESHOLD), Category::Neutral);
    }

    #[test]
    fn test_just_past_boundary() {
        assert_eq!(Category::from_score(0.1001, CATEGORY_THRESHOLD), Category::Positive);
        assert_eq!(Category::from_score(-0.1001, CATEGORY_THRESHOLD), Category::Negative);
        assert_eq!(Category::from_score(1.0, CATEGORY_THRESHOLD), Category::Positive);
        assert_eq!(Category::from_score(-1.0, CATEGORY_THRESHOLD), Category::Negative);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Category::Positive.short_label(), "poz");
        assert_eq!(Category::Negative.short_label(), "neg");
        assert_eq!(Category::Neutral.short_label(), "sem");
        assert_eq!(HybridCategory::Error.to_string(), "error");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Neutral).unwrap(), r#""neutral""#);
        assert_eq!(
            serde_json::to_string(&HybridCategory::Error).unwrap(),
            r#""error""#
        );
    }
}
