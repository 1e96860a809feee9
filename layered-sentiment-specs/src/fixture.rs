//! Fixture file format.
//!
//! A fixture is one TOML document describing an input row, the classifier
//! answer to replay for it, and the verdict fields expected back:
//!
//! ```toml
//! title = "Window negation flips a positive word"
//! text = "Ez nem jó."
//!
//! [[external]]
//! label = "NEGATIVE"
//! score = 0.8
//!
//! [expect]
//! lexical = "negative"
//! hybrid = "negative"
//! rule = 1
//! score_max = 0.0
//! summary = "S1:neg(-0.45)"
//! ```
//!
//! Either `text` or `conllu` must be present. With `conllu` the document is
//! parsed from the given dependency parse instead of the plain tokenizer,
//! and `text` defaults to its `# text =` comment.

use crate::{SpecError, SpecResult};
use layered_sentiment::{
    Category, EngineConfig, FusionRule, HybridCategory, RawPayload, RawPrediction,
};
use layered_sentiment_document::parse_conllu;
use serde::Deserialize;

/// One parsed fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentimentFixture {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// CoNLL-U parse of `text`, replayed through a corpus parser.
    #[serde(default)]
    pub conllu: Option<String>,
    /// Model name reported for the replayed classifier answer.
    #[serde(default = "default_model")]
    pub model: String,
    /// Raw classifier predictions; empty means no classifier.
    #[serde(default)]
    pub external: Vec<RawPrediction>,
    /// Engine settings, same schema as the engine's TOML config.
    #[serde(default)]
    pub config: EngineConfig,
    #[serde(default)]
    pub expect: Expectations,
}

fn default_model() -> String {
    "fixture".to_string()
}

/// Expected fields of the resulting row. Absent fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Expectations {
    pub lexical: Option<Category>,
    pub external: Option<Category>,
    pub hybrid: Option<HybridCategory>,
    /// Fusion rule number, 1 to 6.
    pub rule: Option<u8>,
    /// Inclusive bounds on the rounded lexical score.
    pub score_min: Option<f64>,
    pub score_max: Option<f64>,
    pub summary: Option<String>,
}

impl Expectations {
    /// Number of fields this expectation constrains.
    pub fn len(&self) -> usize {
        [
            self.lexical.is_some(),
            self.external.is_some(),
            self.hybrid.is_some(),
            self.rule.is_some(),
            self.score_min.is_some(),
            self.score_max.is_some(),
            self.summary.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SentimentFixture {
    /// The input row.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    pub fn has_classifier(&self) -> bool {
        !self.external.is_empty()
    }

    pub fn payload(&self) -> RawPayload {
        RawPayload::new(self.external.clone())
    }
}

/// Parse fixture TOML. `name` is only used in error messages.
pub fn parse_fixture(name: &str, content: &str) -> SpecResult<SentimentFixture> {
    let invalid = |message: String| SpecError::Parse {
        fixture: name.to_string(),
        message,
    };

    let mut fixture: SentimentFixture =
        toml::from_str(content).map_err(|e| invalid(e.to_string()))?;

    if let Some(conllu) = &fixture.conllu {
        let document = parse_conllu(conllu).map_err(|e| invalid(e.to_string()))?;
        if fixture.text.is_none() {
            fixture.text = Some(document.text().to_string());
        }
    }

    if fixture.text().trim().is_empty() {
        return Err(invalid("fixture needs `text` or `conllu`".to_string()));
    }
    if fixture.expect.is_empty() {
        return Err(invalid("fixture has no [expect] fields".to_string()));
    }
    if let Some(rule) = fixture.expect.rule {
        if FusionRule::from_number(rule).is_none() {
            return Err(invalid(format!("rule {} is not a fusion rule", rule)));
        }
    }
    fixture
        .config
        .validate()
        .map_err(|e| invalid(e.to_string()))?;

    Ok(fixture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_fixture() {
        let fixture = parse_fixture(
            "plain.toml",
            r#"
title = "Plain"
text = "Ez nem jó."

[expect]
lexical = "negative"
rule = 3
"#,
        )
        .unwrap();

        assert_eq!(fixture.title.as_deref(), Some("Plain"));
        assert_eq!(fixture.text(), "Ez nem jó.");
        assert_eq!(fixture.model, "fixture");
        assert!(!fixture.has_classifier());
        assert_eq!(fixture.expect.lexical, Some(Category::Negative));
        assert_eq!(fixture.expect.len(), 2);
    }

    #[test]
    fn test_conllu_supplies_text() {
        let fixture = parse_fixture(
            "parsed.toml",
            r#"
conllu = """
# text = Jó.
1	Jó	jó	ADJ	_	_	0	root	_	SpaceAfter=No
2	.	.	PUNCT	_	_	1	punct	_	_
"""

[[external]]
label = "POSITIVE"
score = 0.9

[expect]
hybrid = "positive"
"#,
        )
        .unwrap();

        assert_eq!(fixture.text(), "Jó.");
        assert!(fixture.has_classifier());
        assert_eq!(fixture.payload().predictions.len(), 1);
    }

    #[test]
    fn test_rejects_missing_input() {
        let err = parse_fixture("empty.toml", "[expect]\nhybrid = \"neutral\"\n").unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid fixture empty.toml: fixture needs `text` or `conllu`"
        );
    }

    #[test]
    fn test_rejects_unknown_rule() {
        let err = parse_fixture("rule.toml", "text = \"Jó.\"\n[expect]\nrule = 7\n").unwrap_err();
        assert!(err.to_string().contains("rule 7 is not a fusion rule"));
        let err = parse_fixture("rule.toml", "text = \"Jó.\"\n[expect]\nrule = 0\n").unwrap_err();
        assert!(err.to_string().contains("rule 0 is not a fusion rule"));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(parse_fixture("typo.toml", "text = \"Jó.\"\n[expect]\nhybird = \"positive\"\n").is_err());
    }
}
