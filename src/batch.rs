//! Index-faithful batch classification.
//!
//! [`BatchAligner::align`] returns exactly one [`ExternalSignal`] per input
//! text, at the same index, whatever the chunk size and whatever fails.
//! A failed item gets the `(neutral, 0.5)` fallback; it never aborts the
//! batch.

use crate::classifier::{truncate_chars, Classifier, MAX_INPUT_CHARS};
use crate::signal::NEUTRAL_CONFIDENCE;
use crate::{interpret, Category, ExternalSignal, OrdinalPolicy, RawPayload, Scored};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with a chunk whose batch call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkFailurePolicy {
    /// Classify the chunk's items one by one; only items that fail again
    /// fall back
    #[default]
    RetryEach,
    /// Give every item in the chunk the fallback signal
    Default,
}

/// Chunking and input limits for external classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    pub chunk_size: usize,
    /// Texts are cut to this many characters before classification
    pub max_chars: usize,
    /// Score the documents of a chunk on the rayon pool
    pub parallel: bool,
    pub chunk_failure: ChunkFailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            max_chars: MAX_INPUT_CHARS,
            parallel: true,
            chunk_failure: ChunkFailurePolicy::RetryEach,
        }
    }
}

impl BatchConfig {
    /// Chunk size, never below one.
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }
}

/// The signal substituted for a missing classifier answer.
pub fn fallback_signal(reason: impl Into<String>) -> ExternalSignal {
    Scored::fallback(Category::Neutral, NEUTRAL_CONFIDENCE, reason)
}

#[derive(Debug, Clone, Copy)]
pub struct BatchAligner {
    config: BatchConfig,
    policy: OrdinalPolicy,
}

impl BatchAligner {
    pub fn new(config: BatchConfig, policy: OrdinalPolicy) -> Self {
        Self { config, policy }
    }

    /// One external signal per text, in input order.
    ///
    /// With no classifier every text gets the fallback signal.
    pub fn align(&self, classifier: Option<&dyn Classifier>, texts: &[&str]) -> Vec<ExternalSignal> {
        let classifier = match classifier {
            Some(classifier) => classifier,
            None => {
                return texts
                    .iter()
                    .map(|_| fallback_signal("classifier unavailable"))
                    .collect()
            }
        };

        let chunk_size = self.config.effective_chunk_size();
        let chunk_count = (texts.len() + chunk_size - 1) / chunk_size;
        let mut signals = Vec::with_capacity(texts.len());

        for (chunk_index, chunk) in texts.chunks(chunk_size).enumerate() {
            let truncated: Vec<&str> = chunk
                .iter()
                .map(|text| truncate_chars(text, self.config.max_chars))
                .collect();
            signals.extend(self.align_chunk(classifier, &truncated));
            debug!(
                "Classified chunk {}/{} ({} texts)",
                chunk_index + 1,
                chunk_count,
                chunk.len()
            );
        }

        debug_assert_eq!(signals.len(), texts.len());
        signals
    }

    fn align_chunk(&self, classifier: &dyn Classifier, chunk: &[&str]) -> Vec<ExternalSignal> {
        let model = classifier.model_name();

        let error = match classifier.classify_batch(chunk) {
            Ok(payloads) if payloads.len() == chunk.len() => {
                return payloads.iter().map(|raw| self.interpret(raw, model)).collect();
            }
            Ok(payloads) => format!(
                "classifier returned {} payloads for {} texts",
                payloads.len(),
                chunk.len()
            ),
            Err(e) => e.to_string(),
        };

        warn!("Chunk of {} texts failed: {}", chunk.len(), error);
        match self.config.chunk_failure {
            ChunkFailurePolicy::RetryEach => chunk
                .iter()
                .enumerate()
                .map(|(index, text)| match classifier.classify(text) {
                    Ok(raw) => self.interpret(&raw, model),
                    Err(e) => {
                        warn!("Item {} of failed chunk fell back to neutral: {}", index, e);
                        fallback_signal(e.to_string())
                    }
                })
                .collect(),
            ChunkFailurePolicy::Default => chunk.iter().map(|_| fallback_signal(error.clone())).collect(),
        }
    }

    fn interpret(&self, raw: &RawPayload, model: &str) -> ExternalSignal {
        interpret(raw, self.policy, model)
    }
}
