//! Error types for the sentiment engine.
//!
//! Per-document failures never reach the caller as `Err`: the engine folds
//! them into [`HybridResult::failed`](crate::HybridResult::failed) or into a
//! fallback external signal. Only configuration loading returns these
//! errors directly.

use layered_sentiment_document::ProcessError;
use thiserror::Error;

/// Errors that can occur while configuring or running the engine.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// The parsing collaborator failed for one document.
    #[error("parse unavailable: {0}")]
    ParseUnavailable(#[from] ProcessError),

    /// The external classifier failed to load or to answer.
    #[error("classifier unavailable: {message}")]
    ClassifierUnavailable { message: String },

    /// A classifier payload matched none of the recognized shapes.
    #[error("malformed classifier signal: {message}")]
    MalformedSignal { message: String },

    /// Invalid configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Failed to read a configuration file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SentimentError {
    pub fn classifier(message: impl Into<String>) -> Self {
        Self::ClassifierUnavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSignal {
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, SentimentError>;
