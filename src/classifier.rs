//! The external classifier seam.
//!
//! The engine never loads a model itself. Callers hand it an
//! `Arc<dyn Classifier>` for the lifetime of the engine, or none at all, in
//! which case every document runs lexicon-only.

use crate::errors::Result;
use crate::RawPayload;
use std::collections::HashMap;
use std::sync::Arc;

/// Longest input, in characters, a classifier is given.
pub const MAX_INPUT_CHARS: usize = 512;

/// Black-box text classifier returning label/score payloads.
pub trait Classifier: Send + Sync {
    /// Identifier recorded in signal provenance.
    fn model_name(&self) -> &str;

    /// Classify one text (already truncated by the caller).
    fn classify(&self, text: &str) -> Result<RawPayload>;

    /// Classify a chunk. Must return one payload per input, in order.
    ///
    /// The default calls [`classify`](Classifier::classify) per item and
    /// fails the whole chunk on the first error.
    fn classify_batch(&self, texts: &[&str]) -> Result<Vec<RawPayload>> {
        texts.iter().map(|text| self.classify(text)).collect()
    }
}

impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn classify(&self, text: &str) -> Result<RawPayload> {
        (**self).classify(text)
    }

    fn classify_batch(&self, texts: &[&str]) -> Result<Vec<RawPayload>> {
        (**self).classify_batch(texts)
    }
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// Answers from a fixed text → payload table.
///
/// Texts missing from the table classify as an empty payload, which
/// interprets as `(neutral, 0.5)`. Useful for replaying stored classifier
/// output and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedClassifier {
    name: String,
    answers: HashMap<String, RawPayload>,
}

impl FixedClassifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            answers: HashMap::new(),
        }
    }

    pub fn answer(mut self, text: impl Into<String>, payload: impl Into<RawPayload>) -> Self {
        self.insert(text, payload);
        self
    }

    pub fn insert(&mut self, text: impl Into<String>, payload: impl Into<RawPayload>) {
        self.answers.insert(text.into(), payload.into());
    }
}

impl Classifier for FixedClassifier {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn classify(&self, text: &str) -> Result<RawPayload> {
        Ok(self.answers.get(text).cloned().unwrap_or_default())
    }
}
