use crate::errors::Result;
use crate::{
    BatchConfig, ChunkFailurePolicy, Classifier, EngineConfig, HybridResult, RawPayload,
    RawPrediction, SentimentEngine, SentimentError,
};
use std::sync::Arc;

const TEXTS: &[&str] = &[
    "Nagyon jó volt az előadás. Nem tetszett a terem.",
    "Nem rossz, de lehetne jobb.",
    "Unalmas és száraz.",
    "Hétfőn kezdünk.",
    "Soha többé. Kiváló volt viszont a szünet.",
    "<p>Hasznos</p> anyag, lásd https://pelda.hu/anyag",
    "rendkívül frusztráló",
];

/// Answers by keyword; a whole chunk fails whenever it contains "Soha",
/// a single call fails on "frusztráló".
struct Keyword;

impl Classifier for Keyword {
    fn model_name(&self) -> &str {
        "keyword"
    }

    fn classify(&self, text: &str) -> Result<RawPayload> {
        if text.contains("frusztráló") {
            return Err(SentimentError::classifier("refused"));
        }
        let winner = if text.contains("jó") || text.contains("Hasznos") {
            2
        } else if text.contains("rossz") || text.contains("Unalmas") {
            0
        } else {
            1
        };
        Ok((0..3)
            .map(|k| RawPrediction::new(format!("LABEL_{}", k), if k == winner { 0.7 } else { 0.15 }))
            .collect::<Vec<_>>()
            .into())
    }

    fn classify_batch(&self, texts: &[&str]) -> Result<Vec<RawPayload>> {
        if texts.iter().any(|t| t.contains("Soha")) {
            return Err(SentimentError::classifier("chunk rejected"));
        }
        texts.iter().map(|t| self.classify(t)).collect()
    }
}

fn engine(chunk_size: usize, parallel: bool) -> SentimentEngine {
    SentimentEngine::builder()
        .shared_classifier(Arc::new(Keyword))
        .config(EngineConfig {
            batch: BatchConfig {
                chunk_size,
                parallel,
                chunk_failure: ChunkFailurePolicy::RetryEach,
                ..BatchConfig::default()
            },
            ..EngineConfig::default()
        })
        .build()
        .unwrap()
}

fn alone(text: &str) -> HybridResult {
    engine(16, false).analyze(text)
}

#[test]
fn batch_matches_single_for_any_chunk_size() {
    let expected: Vec<HybridResult> = TEXTS.iter().map(|t| alone(t)).collect();

    for chunk_size in [1, 2, 3, 5, 7, 64] {
        for parallel in [false, true] {
            let results: Vec<_> = engine(chunk_size, parallel).analyze_all(TEXTS).collect();
            assert_eq!(results, expected, "chunk size {} parallel {}", chunk_size, parallel);
        }
    }
}

#[test]
fn batch_matches_single_for_any_order() {
    let engine = engine(3, true);
    let n = TEXTS.len();

    let orders: Vec<Vec<usize>> = vec![
        (0..n).rev().collect(),
        (0..n).map(|i| (i + 3) % n).collect(),
        (0..n).map(|i| (i * 3) % n).collect(),
    ];

    for order in orders {
        let permuted: Vec<&str> = order.iter().map(|&i| TEXTS[i]).collect();
        let results: Vec<_> = engine.analyze_all(&permuted).collect();
        assert_eq!(results.len(), n);
        for (result, &i) in results.iter().zip(&order) {
            assert_eq!(*result, alone(TEXTS[i]), "text {} in order {:?}", i, order);
        }
    }
}

#[test]
fn failures_stay_local() {
    let results: Vec<_> = engine(4, true).analyze_all(TEXTS).collect();

    // The refused text falls back to neutral/0.5; its neighbours keep their answers.
    let refused = &results[6];
    assert_eq!(refused.external_confidence, 0.5);
    assert!(matches!(
        refused.external_source,
        crate::ScoreSource::Fallback { .. }
    ));
    assert_eq!(results[5].external_category, crate::Category::Positive);
    assert_eq!(results[0].external_category, crate::Category::Positive);
    assert!(results.iter().all(|r| !r.is_error()));
}

#[test]
fn sentences_never_see_neighbouring_rows() {
    let engine = SentimentEngine::lexicon_only();
    let rows = ["Nem.", "Jó volt."];
    let results: Vec<_> = engine.analyze_all(rows).collect();

    assert_eq!(results[1], engine.analyze("Jó volt."));
    assert_eq!(results[1].sentence_summary, "S1:poz(+0.73)");
}
