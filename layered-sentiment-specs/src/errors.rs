//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while loading or running fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture file is not valid fixture TOML.
    #[error("invalid fixture {fixture}: {message}")]
    Parse { fixture: String, message: String },

    /// A fixture file or directory could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// The engine described by a fixture could not be assembled.
    #[error("engine setup failed for {fixture}: {message}")]
    Engine { fixture: String, message: String },
}

/// Result type for harness operations.
pub type SpecResult<T> = Result<T, SpecError>;
