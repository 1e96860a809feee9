//! Expected failures tracking via TOML file.

use crate::runner::FixtureOutcome;
use crate::{SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture file name, relative to the fixtures directory.
    pub fixture: String,
    /// The `[expect]` key that fails (e.g. "score_min").
    pub field: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file is an empty ledger.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SpecError::Parse {
            fixture: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn is_expected(&self, fixture: &str, field: &str) -> FailureState {
        if self.known.iter().any(|e| e.matches(fixture, field)) {
            return FailureState::Known;
        }
        if self.pending.iter().any(|e| e.matches(fixture, field)) {
            return FailureState::Pending;
        }
        FailureState::Regression
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    pub fn get_entry(&self, fixture: &str, field: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.matches(fixture, field))
    }
}

impl FailureEntry {
    fn matches(&self, fixture: &str, field: &str) -> bool {
        self.fixture == fixture && self.field == field
    }
}

/// Result of running the harness.
#[derive(Debug, Clone, Default)]
pub struct HarnessResult {
    /// Total expected fields checked.
    pub total: usize,
    pub passed: usize,
    /// Expected failures (known + pending).
    pub expected_failures: usize,
    /// Regressions (unexpected failures).
    pub regressions: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the exit code (0 = pass, 1 = regressions).
    pub fn exit_code(&self) -> i32 {
        if self.regressions > 0 {
            1
        } else {
            0
        }
    }

    /// Check if all tests passed (no regressions).
    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => {
                self.expected_failures += 1;
            }
            FailureState::Regression => {
                self.regressions += 1;
            }
        }
    }

    /// Record every field of a fixture run, consulting the ledger for the
    /// mismatched ones. Returns the mismatches that are regressions.
    pub fn record_outcome<'o>(
        &mut self,
        outcome: &'o FixtureOutcome,
        expected: &ExpectedFailures,
    ) -> Vec<&'o str> {
        let mut regressions = Vec::new();
        for _ in outcome.mismatches.len()..outcome.checked {
            self.record_pass();
        }
        for mismatch in &outcome.mismatches {
            let state = expected.is_expected(&outcome.name, mismatch.field);
            if state == FailureState::Regression {
                regressions.push(mismatch.field);
            }
            self.record_failure(state);
        }
        regressions
    }
}
