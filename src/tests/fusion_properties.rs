use crate::{Category, DecisionFusion, FusionRule, FusionThresholds, Lexicon, LexicalScorer};
use layered_sentiment_document::{Parser, PlainTextParser};

const CATEGORIES: [Category; 3] = [Category::Positive, Category::Negative, Category::Neutral];

fn grid() -> impl Iterator<Item = (f64, Category, Category, f64)> {
    let scores = [-1.0, -0.3, -0.25, -0.11, -0.1, 0.0, 0.1, 0.11, 0.25, 0.3, 1.0];
    let confidences = [0.0, 0.3, 0.5, 0.51, 0.55, 0.56, 1.0];
    scores.into_iter().flat_map(move |score| {
        CATEGORIES.into_iter().flat_map(move |lexical| {
            CATEGORIES.into_iter().flat_map(move |external| {
                confidences
                    .into_iter()
                    .map(move |conf| (score, lexical, external, conf))
            })
        })
    })
}

/// Each rule's condition, evaluated independently of the cascade.
fn holds(rule: FusionRule, score: f64, lexical: Category, external: Category, conf: f64) -> bool {
    let t = FusionThresholds::default();
    match rule {
        FusionRule::Agreement => lexical == external,
        FusionRule::ExternalStrong => conf >= t.external_strong && external != Category::Neutral,
        FusionRule::LexicalStrong => score.abs() >= t.lexical_strong && lexical != Category::Neutral,
        FusionRule::ExternalModerate => {
            conf > t.external_moderate && external != Category::Neutral
        }
        FusionRule::LexicalWeak => score.abs() > t.lexical_weak && lexical != Category::Neutral,
        FusionRule::Neutral => true,
    }
}

#[test]
fn agreement_wins_at_any_confidence() {
    let fusion = DecisionFusion::default();
    for (score, category, _, conf) in grid() {
        let decision = fusion.fuse(score, category, category, conf);
        assert_eq!(decision.category, category);
        assert_eq!(decision.rule, FusionRule::Agreement);
    }
}

#[test]
fn first_matching_rule_fires() {
    let fusion = DecisionFusion::default();
    for (score, lexical, external, conf) in grid() {
        let decision = fusion.fuse(score, lexical, external, conf);
        let expected = FusionRule::ALL
            .into_iter()
            .find(|rule| holds(*rule, score, lexical, external, conf))
            .unwrap();

        assert_eq!(decision.rule, expected, "{:?}", (score, lexical, external, conf));
        assert!(decision
            .justification
            .starts_with(&format!("rule {} ", expected.number())));

        let again = fusion.fuse(score, lexical, external, conf);
        assert_eq!(again, decision);
    }
}

#[test]
fn verdict_comes_from_the_winning_side() {
    let fusion = DecisionFusion::default();
    for (score, lexical, external, conf) in grid() {
        let decision = fusion.fuse(score, lexical, external, conf);
        let expected = match decision.rule {
            FusionRule::Agreement | FusionRule::LexicalStrong | FusionRule::LexicalWeak => lexical,
            FusionRule::ExternalStrong | FusionRule::ExternalModerate => external,
            FusionRule::Neutral => Category::Neutral,
        };
        assert_eq!(decision.category, expected);
    }
}

#[test]
fn negation_asymmetry() {
    let lexicon = Lexicon::hungarian();
    let scorer = LexicalScorer::new(&lexicon);
    let parser = PlainTextParser::new();
    let raw = |text: &str| scorer.explain(&parser.parse(text).unwrap().view()).raw_sum;

    let negated_positive = raw("nem jó");
    let negative = raw("rossz");
    let negated_negative = raw("nem rossz");
    let positive = raw("jó");

    assert!(negated_positive < 0.0 && negated_positive.abs() < negative.abs());
    assert!(negated_negative > 0.0 && negated_negative < positive);
}

#[test]
fn lexical_score_stays_in_range() {
    let lexicon = Lexicon::hungarian();
    let scorer = LexicalScorer::new(&lexicon);
    let parser = PlainTextParser::new();
    let texts = [
        "",
        "jó",
        "rossz rossz rossz rossz rossz rossz rossz rossz",
        "nem nem nem jó jó jó",
        "kiváló tökéletes remek szuper fantasztikus nagyszerű",
        "a b c d e f g h i j k l m n o p",
    ];
    for text in texts {
        let score = scorer.score(&parser.parse(text).unwrap().view());
        assert!((-1.0..=1.0).contains(&score), "{} -> {}", text, score);
    }
}
