//! Normalization of raw classifier output into an [`ExternalSignal`].
//!
//! Classifiers answer either with semantic labels (`POSITIVE`, `negatív`,
//! `Neutral`, ...) or with an ordinal distribution over `LABEL_0..LABEL_n`.
//! [`interpret`] maps both shapes onto the three categories; anything it
//! cannot make sense of becomes `(neutral, 0.5)`.

use crate::{Category, Scored, SentimentError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Category and confidence reported by (or substituted for) the classifier.
pub type ExternalSignal = Scored<Category>;

/// Confidence used whenever no usable classifier answer exists.
pub const NEUTRAL_CONFIDENCE: f64 = 0.5;

/// Combined marker mass above which semantic labels are trusted.
const MARKER_MASS_FLOOR: f64 = 0.05;

const POSITIVE_MARKERS: &[&str] = &["POSITIV", "POSITIVE", "POS", "POZIT"];
const NEGATIVE_MARKERS: &[&str] = &["NEGATIV", "NEGATIVE", "NEG"];
const NEUTRAL_MARKERS: &[&str] = &["NEUTRAL", "NEU", "SEMLEGES"];

/// One label/score pair from a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub label: String,
    pub score: f64,
}

impl RawPrediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// All predictions returned for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPayload {
    pub predictions: Vec<RawPrediction>,
}

impl RawPayload {
    pub fn new(predictions: Vec<RawPrediction>) -> Self {
        Self { predictions }
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Read a classifier payload from JSON.
    ///
    /// Accepts a single `{label, score}` object, a list of them, or a list
    /// wrapped in another list (the shape returned when every class score is
    /// requested). Unrecognized shapes give an empty payload.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        let items: &[Value] = match value {
            Value::Object(_) => std::slice::from_ref(value),
            Value::Array(items) => match items.first() {
                Some(Value::Array(inner)) => inner.as_slice(),
                _ => items.as_slice(),
            },
            _ => &[],
        };

        let predictions = items
            .iter()
            .filter_map(|item| serde_json::from_value::<RawPrediction>(item.clone()).ok())
            .collect();
        Self { predictions }
    }
}

impl From<Vec<RawPrediction>> for RawPayload {
    fn from(predictions: Vec<RawPrediction>) -> Self {
        Self::new(predictions)
    }
}

/// How ordinal labels outside the 3- and 5-class schemes are bucketed.
///
/// Both policies split `0..=max_label` into thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrdinalPolicy {
    /// `k <= max/3` negative, else `k >= 2*max/3` positive, else neutral.
    /// Each label lands in exactly one bucket; a lone label is neutral.
    #[default]
    Thirds,
    /// Inclusive bounds on both ends, so a label on both bounds counts
    /// toward negative and positive alike.
    OverlappingThirds,
}

#[derive(Debug, Default, Clone, Copy)]
struct Buckets {
    positive: f64,
    negative: f64,
    neutral: f64,
}

impl Buckets {
    fn total(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Highest bucket; ties go positive, then negative, then neutral.
    fn winner(&self) -> (Category, f64) {
        let best = self.positive.max(self.negative).max(self.neutral);
        if best == self.positive && self.positive > 0.0 {
            (Category::Positive, self.positive)
        } else if best == self.negative && self.negative > 0.0 {
            (Category::Negative, self.negative)
        } else if self.neutral > 0.0 {
            (Category::Neutral, self.neutral)
        } else {
            (Category::Neutral, NEUTRAL_CONFIDENCE)
        }
    }
}

/// Latest score per uppercased label; duplicate labels keep the last score.
fn scores_by_label(raw: &RawPayload) -> Vec<(String, f64)> {
    let mut scores: Vec<(String, f64)> = Vec::new();
    for prediction in &raw.predictions {
        let label = prediction.label.to_uppercase();
        match scores.iter_mut().find(|(l, _)| *l == label) {
            Some((_, score)) => *score = prediction.score,
            None => scores.push((label, prediction.score)),
        }
    }
    scores
}

fn marker_buckets(scores: &[(String, f64)]) -> Buckets {
    let mass = |markers: &[&str]| -> f64 {
        scores
            .iter()
            .filter(|(label, _)| markers.iter().any(|m| label.contains(m)))
            .map(|(_, score)| *score)
            .sum()
    };
    Buckets {
        positive: mass(POSITIVE_MARKERS),
        negative: mass(NEGATIVE_MARKERS),
        neutral: mass(NEUTRAL_MARKERS),
    }
}

fn ordinal_buckets(ordinal: &BTreeMap<u64, f64>, policy: OrdinalPolicy) -> Buckets {
    let get = |k: u64| ordinal.get(&k).copied().unwrap_or(0.0);
    match ordinal.len() {
        3 => Buckets {
            negative: get(0),
            neutral: get(1),
            positive: get(2),
        },
        5 => Buckets {
            negative: get(0) + get(1),
            neutral: get(2),
            positive: get(3) + get(4),
        },
        _ => {
            let max_label = ordinal.keys().next_back().copied().unwrap_or(0) as f64;
            let low = max_label / 3.0;
            let high = max_label * 2.0 / 3.0;
            let mut buckets = Buckets::default();
            for (&k, &score) in ordinal {
                let k = k as f64;
                match policy {
                    OrdinalPolicy::Thirds => {
                        if max_label == 0.0 {
                            buckets.neutral += score;
                        } else if k <= low {
                            buckets.negative += score;
                        } else if k >= high {
                            buckets.positive += score;
                        } else {
                            buckets.neutral += score;
                        }
                    }
                    OrdinalPolicy::OverlappingThirds => {
                        if k <= low {
                            buckets.negative += score;
                        }
                        if k >= high {
                            buckets.positive += score;
                        }
                        if low < k && k < high {
                            buckets.neutral += score;
                        }
                    }
                }
            }
            buckets
        }
    }
}

/// Map a raw classifier payload to `(category, confidence)`.
///
/// Semantic labels win when their combined mass exceeds 0.05; otherwise
/// labels are read as ordinal indices (an optional `LABEL_` prefix is
/// stripped, non-integer labels are skipped). Never fails: empty or
/// unreadable payloads yield `(neutral, 0.5)` tagged as a fallback.
pub fn interpret(raw: &RawPayload, policy: OrdinalPolicy, model: &str) -> ExternalSignal {
    if raw.is_empty() {
        return Scored::fallback(Category::Neutral, NEUTRAL_CONFIDENCE, "empty classifier payload");
    }

    let scores = scores_by_label(raw);

    let markers = marker_buckets(&scores);
    if markers.total() > MARKER_MASS_FLOOR {
        let (category, confidence) = markers.winner();
        return Scored::classified(category, confidence, model);
    }

    let ordinal: BTreeMap<u64, f64> = scores
        .iter()
        .filter_map(|(label, score)| {
            let index = label.strip_prefix("LABEL_").unwrap_or(label);
            index.trim().parse::<u64>().ok().map(|k| (k, *score))
        })
        .collect();

    if ordinal.is_empty() {
        let error = SentimentError::malformed(format!("unrecognized labels from {}", model));
        debug!("{}", error);
        return Scored::fallback(Category::Neutral, NEUTRAL_CONFIDENCE, error.to_string());
    }

    let buckets = ordinal_buckets(&ordinal, policy);
    let (category, confidence) = buckets.winner();
    if buckets.positive.max(buckets.negative).max(buckets.neutral) <= 0.0 {
        return Scored::fallback(category, confidence, "zero ordinal mass");
    }
    Scored::classified(category, confidence, model)
}
