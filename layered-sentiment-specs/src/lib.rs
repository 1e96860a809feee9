#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven regression harness for layered-sentiment.
//!
//! Each fixture is a TOML file naming an input row, an optional replayed
//! classifier answer and the verdict fields expected back. The harness runs
//! every fixture through a [`layered_sentiment::SentimentEngine`] and
//! reports field-level mismatches.
//!
//! ## Modules
//!
//! - [`fixture`] - The fixture file format
//! - [`loader`] - Loading single files or a whole fixtures tree
//! - [`runner`] - Running a fixture and comparing the verdict
//! - [`failures`] - Expected failures tracking via TOML
//! - [`errors`] - Error types for the harness

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{parse_fixture, Expectations, SentimentFixture};
pub use loader::{load_all_fixtures, load_fixture, EXPECTED_FAILURES_FILE};
pub use runner::{fixture_engine, run_fixture, FieldMismatch, FixtureOutcome};

#[cfg(test)]
mod tests;
