use crate::{
    load_all_fixtures, load_fixture, run_fixture, ExpectedFailures, HarnessResult,
    SentimentFixture, EXPECTED_FAILURES_FILE,
};
use layered_sentiment::{Category, FusionRule, HybridCategory};
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn fixture(name: &str) -> SentimentFixture {
    load_fixture(&fixtures_dir().join(name)).unwrap()
}

#[test]
fn test_all_fixtures_against_ledger() {
    let dir = fixtures_dir();
    let expected = ExpectedFailures::load(&dir.join(EXPECTED_FAILURES_FILE)).unwrap();
    let mut harness = HarnessResult::new();
    let mut report = String::new();

    for (name, fixture) in load_all_fixtures(&dir).unwrap() {
        let outcome = run_fixture(&name, &fixture).unwrap();
        if !harness.record_outcome(&outcome, &expected).is_empty() {
            report.push_str(&outcome.to_string());
        }
    }

    assert!(harness.total > 0);
    assert!(harness.success(), "{} regressions\n{}", harness.regressions, report);
}

#[test]
fn test_ledger_entries_still_fail() {
    let dir = fixtures_dir();
    let expected = ExpectedFailures::load(&dir.join(EXPECTED_FAILURES_FILE)).unwrap();

    for entry in expected.known.iter().chain(&expected.pending) {
        let outcome = run_fixture(&entry.fixture, &fixture(&entry.fixture)).unwrap();
        assert!(
            outcome.mismatches.iter().any(|m| m.field == entry.field),
            "{} {} passes now; remove it from {}",
            entry.fixture,
            entry.field,
            EXPECTED_FAILURES_FILE
        );
    }
}

#[test]
fn test_window_negation_fixture() {
    let fixture = fixture("window-negation.toml");
    assert!(!fixture.has_classifier());

    let outcome = run_fixture("window-negation.toml", &fixture).unwrap();
    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(outcome.result.lexical_score, -0.45);
    assert_eq!(outcome.result.rule, Some(FusionRule::LexicalStrong));
}

#[test]
fn test_parsed_fixture_uses_dependency_arcs() {
    let fixture = fixture("intensified-parse.toml");
    assert_eq!(fixture.text(), "Ez egy nagyon jó termék.");

    let outcome = run_fixture("intensified-parse.toml", &fixture).unwrap();
    assert_eq!(outcome.result.lexical_score, 0.7201);
    assert_eq!(outcome.result.profile.relations, vec!["termék->amod->jó"]);
}

#[test]
fn test_every_rule_is_covered() {
    let mut rules: Vec<u8> = load_all_fixtures(&fixtures_dir())
        .unwrap()
        .into_iter()
        .filter_map(|(_, fixture)| fixture.expect.rule)
        .collect();
    rules.sort_unstable();
    rules.dedup();
    assert_eq!(rules, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_agreement_fixture() {
    let outcome = run_fixture("agreement.toml", &fixture("agreement.toml")).unwrap();
    assert!(outcome.passed(), "{}", outcome);
    assert_eq!(outcome.result.external_category, Category::Positive);
    assert_eq!(outcome.result.hybrid_category, HybridCategory::Positive);
    assert_eq!(outcome.result.profile.positive_terms, vec!["Kiváló"]);
}
