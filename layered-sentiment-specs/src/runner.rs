//! Runs fixtures through a [`SentimentEngine`] and compares the verdict.

use crate::fixture::SentimentFixture;
use crate::{SpecError, SpecResult};
use layered_sentiment::{
    clean_text, truncate_chars, FixedClassifier, HybridResult, SentimentEngine,
};
use layered_sentiment_document::{ConlluCorpus, PlainTextParser};
use std::fmt;

/// One expected field that came out differently.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    /// Name of the `[expect]` key.
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected `{}`, found `{}`",
            self.field, self.expected, self.actual
        )
    }
}

/// Result of running one fixture.
#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    pub name: String,
    pub result: HybridResult,
    /// Number of expected fields compared.
    pub checked: usize,
    pub mismatches: Vec<FieldMismatch>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for FixtureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "PASS" } else { "FAIL" };
        writeln!(f, "{}: {}", status, self.name)?;
        writeln!(f, "  {}", self.result.text)?;
        for mismatch in &self.mismatches {
            writeln!(f, "    \u{2717} {}", mismatch)?;
        }
        if !self.passed() {
            writeln!(f, "  justification: {}", self.result.justification)?;
        }
        Ok(())
    }
}

/// Build the engine a fixture describes.
///
/// The classifier answer is keyed on the text the engine will actually
/// send, after cleaning and truncation.
pub fn fixture_engine(name: &str, fixture: &SentimentFixture) -> SpecResult<SentimentEngine> {
    let setup = |message: String| SpecError::Engine {
        fixture: name.to_string(),
        message,
    };

    let mut builder = SentimentEngine::builder().config(fixture.config.clone());

    builder = match &fixture.conllu {
        Some(conllu) => builder.parser(
            ConlluCorpus::from_conllu_stream(conllu).map_err(|e| setup(e.to_string()))?,
        ),
        None => builder.parser(PlainTextParser::new()),
    };

    if fixture.has_classifier() {
        let cleaned = clean_text(fixture.text());
        let sent = truncate_chars(&cleaned, fixture.config.batch.max_chars);
        builder = builder.classifier(FixedClassifier::new(&fixture.model).answer(sent, fixture.payload()));
    }

    builder.build().map_err(|e| setup(e.to_string()))
}

/// Run a fixture and collect field-level mismatches.
pub fn run_fixture(name: &str, fixture: &SentimentFixture) -> SpecResult<FixtureOutcome> {
    let engine = fixture_engine(name, fixture)?;
    let result = engine.analyze(fixture.text());
    let expect = &fixture.expect;
    let mut mismatches = Vec::new();

    let mut check = |field: &'static str, expected: String, actual: String, ok: bool| {
        if !ok {
            mismatches.push(FieldMismatch {
                field,
                expected,
                actual,
            });
        }
    };

    if let Some(lexical) = expect.lexical {
        let actual = result.lexical_category;
        check("lexical", lexical.to_string(), actual.to_string(), actual == lexical);
    }
    if let Some(external) = expect.external {
        let actual = result.external_category;
        check("external", external.to_string(), actual.to_string(), actual == external);
    }
    if let Some(hybrid) = expect.hybrid {
        let actual = result.hybrid_category;
        check("hybrid", hybrid.to_string(), actual.to_string(), actual == hybrid);
    }
    if let Some(rule) = expect.rule {
        let actual = result.rule.map(|r| r.number());
        check(
            "rule",
            rule.to_string(),
            actual.map_or_else(|| "none".to_string(), |n| n.to_string()),
            actual == Some(rule),
        );
    }
    if let Some(min) = expect.score_min {
        let actual = result.lexical_score;
        check("score_min", format!(">= {}", min), actual.to_string(), actual >= min);
    }
    if let Some(max) = expect.score_max {
        let actual = result.lexical_score;
        check("score_max", format!("<= {}", max), actual.to_string(), actual <= max);
    }
    if let Some(summary) = &expect.summary {
        let actual = &result.sentence_summary;
        check("summary", summary.clone(), actual.clone(), actual == summary);
    }

    Ok(FixtureOutcome {
        name: name.to_string(),
        result,
        checked: expect.len(),
        mismatches,
    })
}
