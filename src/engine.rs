//! The analysis entry point.
//!
//! [`SentimentEngine`] owns every long-lived handle explicitly: the lexicon,
//! the parser and the optional classifier are passed in when the engine is
//! built, so two engines never share hidden state.
//!
//! Single texts and batches go through the same path:
//! [`analyze`](SentimentEngine::analyze) is `analyze_all(once(text))`.

use crate::batch::BatchAligner;
use crate::errors::{Result, SentimentError};
use crate::{
    clean_text, round4, Classifier, DecisionFusion, EngineConfig, ExternalSignal, HybridResult,
    LexicalScorer, Lexicon, LinguisticProfile, RunStatistics, Scored, SentenceAggregator,
    SentenceDisplay, SentenceJudgment, WeightedAggregate,
};
use layered_sentiment_document::{Document, Parser, PlainTextParser};
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Hybrid lexicon + classifier sentiment engine.
pub struct SentimentEngine {
    lexicon: Arc<Lexicon>,
    parser: Arc<dyn Parser>,
    classifier: Option<Arc<dyn Classifier>>,
    config: EngineConfig,
}

impl fmt::Debug for SentimentEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentEngine")
            .field(
                "classifier",
                &self.classifier.as_ref().map(|c| c.model_name().to_string()),
            )
            .field("config", &self.config)
            .finish()
    }
}

#[derive(Default)]
pub struct SentimentEngineBuilder {
    lexicon: Option<Arc<Lexicon>>,
    parser: Option<Arc<dyn Parser>>,
    classifier: Option<Arc<dyn Classifier>>,
    config: EngineConfig,
}

impl SentimentEngineBuilder {
    /// Use this lexicon instead of the one described by the config.
    pub fn lexicon(mut self, lexicon: impl Into<Arc<Lexicon>>) -> Self {
        self.lexicon = Some(lexicon.into());
        self
    }

    pub fn parser<P: Parser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    pub fn shared_parser(mut self, parser: Arc<dyn Parser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn classifier<C: Classifier + 'static>(mut self, classifier: C) -> Self {
        self.classifier = Some(Arc::new(classifier));
        self
    }

    pub fn shared_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the config and assemble the engine.
    ///
    /// Without a parser the [`PlainTextParser`] is used; without a classifier
    /// every document is scored lexicon-only.
    pub fn build(self) -> Result<SentimentEngine> {
        self.config.validate()?;
        let lexicon = match self.lexicon {
            Some(lexicon) => lexicon,
            None => Arc::new(self.config.lexicon.build()),
        };
        if self.classifier.is_none() {
            warn!("No classifier configured, external signals pinned to neutral/0.5");
        }
        Ok(SentimentEngine {
            lexicon,
            parser: self
                .parser
                .unwrap_or_else(|| Arc::new(PlainTextParser::new())),
            classifier: self.classifier,
            config: self.config,
        })
    }
}

/// Sentence-unit analysis: each sentence classified on its own, then
/// collapsed by word-weighted aggregation.
#[derive(Debug, Clone)]
pub struct SentenceAnalysis {
    pub sentences: Vec<SentenceJudgment>,
    pub aggregate: WeightedAggregate,
    /// The aggregate fused like a document-level result
    pub result: HybridResult,
}

impl SentimentEngine {
    pub fn builder() -> SentimentEngineBuilder {
        SentimentEngineBuilder::default()
    }

    /// Engine with the built-in lexicon, the plain-text parser and no classifier.
    pub fn lexicon_only() -> Self {
        Self {
            lexicon: Arc::new(Lexicon::hungarian()),
            parser: Arc::new(PlainTextParser::new()),
            classifier: None,
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn scorer(&self) -> LexicalScorer<'_> {
        LexicalScorer::new(&self.lexicon)
            .with_weights(self.config.scoring)
            .with_category_threshold(self.config.thresholds.category)
    }

    pub fn aggregator(&self) -> SentenceAggregator<'_> {
        SentenceAggregator::new(self.scorer()).with_min_chars(self.config.sentences.min_chars)
    }

    pub fn fusion(&self) -> DecisionFusion {
        DecisionFusion::new(self.config.thresholds)
    }

    fn aligner(&self) -> BatchAligner {
        BatchAligner::new(self.config.batch, self.config.ordinal.policy)
    }

    /// Analyze texts lazily, one chunk at a time, yielding results in input order.
    ///
    /// Nothing is computed until the iterator is polled. Each result depends
    /// only on its own text, so calling this again on the same input
    /// reproduces the same sequence.
    pub fn analyze_all<I>(&self, texts: I) -> Analyses<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Analyses {
            engine: self,
            texts: texts.into_iter(),
            ready: Vec::new().into_iter(),
        }
    }

    /// Analyze one text.
    pub fn analyze(&self, text: &str) -> HybridResult {
        self.analyze_all(std::iter::once(text))
            .next()
            .unwrap_or_else(|| HybridResult::failed(text, "no result produced"))
    }

    /// Score and fuse an already parsed document against a known external signal.
    pub fn analyze_document(&self, doc: &Document, external: &ExternalSignal) -> HybridResult {
        self.fuse_document(doc.text(), doc, external)
    }

    /// Classify each sentence separately and fuse the weighted aggregate.
    ///
    /// The document-level [`analyze`](Self::analyze) remains the primary
    /// verdict; this mode is for inputs where the sentence is the natural
    /// unit of classification.
    pub fn analyze_sentences(&self, text: &str) -> SentenceAnalysis {
        let cleaned = clean_text(text);
        let doc = match self.parser.parse(&cleaned) {
            Ok(doc) => doc,
            Err(e) => {
                let error = SentimentError::from(e);
                warn!("Parse failed, row marked as error: {}", error);
                return SentenceAnalysis {
                    sentences: Vec::new(),
                    aggregate: self.aggregator().aggregate(&[]),
                    result: HybridResult::failed(text, &error.to_string()),
                };
            }
        };

        let scorer = self.scorer();
        let aggregator = self.aggregator();
        let scored = aggregator.breakdown(&doc);
        let texts: Vec<&str> = scored.iter().map(|s| s.text.as_str()).collect();
        let externals = self.aligner().align(self.classifier.as_deref(), &texts);

        let sentences: Vec<SentenceJudgment> = scored
            .iter()
            .zip(externals)
            .map(|(sentence, external)| SentenceJudgment {
                text: sentence.text.clone(),
                lexical_score: sentence.score,
                external,
            })
            .collect();
        let aggregate = aggregator.aggregate(&sentences);
        let external = Scored::derived(aggregate.category, aggregate.confidence);

        let lexical_category = scorer.category(aggregate.score);
        let decision = self.fusion().fuse(
            aggregate.score,
            lexical_category,
            external.value,
            external.confidence,
        );

        let result = HybridResult {
            text: cleaned,
            lexical_category,
            lexical_score: round4(aggregate.score),
            external_category: external.value,
            external_confidence: round4(external.confidence),
            external_source: external.source,
            hybrid_category: decision.category.into(),
            rule: Some(decision.rule),
            justification: decision.justification,
            sentence_summary: crate::aggregate::format_summary(&scored),
            profile: LinguisticProfile::from_document(&doc, &self.lexicon),
        };

        SentenceAnalysis {
            sentences,
            aggregate,
            result,
        }
    }

    /// Render every sentence of `text` with its lexicon hits and negation cues.
    pub fn explain(&self, text: &str) -> Result<String> {
        let doc = self.parser.parse(&clean_text(text))?;
        let scorer = self.scorer();
        let rendered: Vec<String> = (0..doc.sentence_count())
            .filter_map(|index| doc.sentence_view(index))
            .map(|view| SentenceDisplay::new(&view, &scorer).to_string())
            .collect();
        Ok(rendered.join("\n\n"))
    }

    fn process_chunk(&self, texts: &[String]) -> Vec<HybridResult> {
        let cleaned: Vec<String> = texts.iter().map(|t| clean_text(t)).collect();
        let refs: Vec<&str> = cleaned.iter().map(String::as_str).collect();
        let externals = self.aligner().align(self.classifier.as_deref(), &refs);

        let rows: Vec<((&String, &String), ExternalSignal)> =
            texts.iter().zip(cleaned.iter()).zip(externals).collect();

        let results: Vec<HybridResult> = if self.config.batch.parallel {
            rows.into_par_iter()
                .map(|((raw, cleaned), external)| self.analyze_row(raw, cleaned, &external))
                .collect()
        } else {
            rows.into_iter()
                .map(|((raw, cleaned), external)| self.analyze_row(raw, cleaned, &external))
                .collect()
        };

        debug!("Analyzed chunk of {} texts", results.len());
        results
    }

    fn analyze_row(&self, raw: &str, cleaned: &str, external: &ExternalSignal) -> HybridResult {
        match self.parser.parse(cleaned) {
            Ok(doc) => self.fuse_document(cleaned, &doc, external),
            Err(e) => {
                let error = SentimentError::from(e);
                warn!("Parse failed, row marked as error: {}", error);
                HybridResult::failed(raw, &error.to_string())
            }
        }
    }

    fn fuse_document(&self, text: &str, doc: &Document, external: &ExternalSignal) -> HybridResult {
        let lexical = self.scorer().signal(&doc.view());
        let decision = self.fusion().fuse(
            lexical.score,
            lexical.category,
            external.value,
            external.confidence,
        );

        HybridResult {
            text: text.to_string(),
            lexical_category: lexical.category,
            lexical_score: round4(lexical.score),
            external_category: external.value,
            external_confidence: round4(external.confidence),
            external_source: external.source.clone(),
            hybrid_category: decision.category.into(),
            rule: Some(decision.rule),
            justification: decision.justification,
            sentence_summary: self.aggregator().summary(doc),
            profile: LinguisticProfile::from_document(doc, &self.lexicon),
        }
    }
}

/// Lazy, ordered results of [`SentimentEngine::analyze_all`].
pub struct Analyses<'e, I> {
    engine: &'e SentimentEngine,
    texts: I,
    ready: std::vec::IntoIter<HybridResult>,
}

impl<'e, I> Iterator for Analyses<'e, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = HybridResult;

    fn next(&mut self) -> Option<HybridResult> {
        loop {
            if let Some(result) = self.ready.next() {
                return Some(result);
            }
            let chunk_size = self.engine.config.batch.effective_chunk_size();
            let chunk: Vec<String> = self
                .texts
                .by_ref()
                .take(chunk_size)
                .map(|t| t.as_ref().to_string())
                .collect();
            if chunk.is_empty() {
                return None;
            }
            self.ready = self.engine.process_chunk(&chunk).into_iter();
        }
    }
}

impl<'e, I> Analyses<'e, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    /// Drain the remaining results and tally them.
    pub fn with_statistics(self) -> (Vec<HybridResult>, RunStatistics) {
        let results: Vec<HybridResult> = self.collect();
        let statistics = RunStatistics::from_results(&results);
        debug!("Run finished: {} results", statistics.total);
        (results, statistics)
    }
}
