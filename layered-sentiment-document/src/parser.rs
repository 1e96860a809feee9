//! The parsing collaborator seam and a dependency-free fallback tokenizer.

use unicode_segmentation::UnicodeSegmentation;

use crate::builder::{DocumentBuilder, TokenSpec};
use crate::document::{Document, ProcessError};

/// Turns cleaned text into an annotated [`Document`].
///
/// Implementations must be pure with respect to their input: parsing the
/// same text twice yields the same document, and no document ever sees
/// another input's tokens.
pub trait Parser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Document, ProcessError>;
}

impl<P: Parser + ?Sized> Parser for std::sync::Arc<P> {
    fn parse(&self, text: &str) -> Result<Document, ProcessError> {
        (**self).parse(text)
    }
}

/// Function words flagged as stop words by [`PlainTextParser`].
const STOP_WORDS: &[&str] = &[
    "a", "az", "és", "hogy", "is", "de", "meg", "egy", "el", "van", "nem", "ezt", "azt", "ez",
    "én", "te", "mi", "ti", "ők", "ami", "aki", "volt", "lett", "csak", "már", "még", "sem",
    "se", "ha", "ki", "be", "fel", "le", "on", "ön", "őt", "itt",
];

/// Word-boundary tokenizer with punctuation-based sentence splitting.
///
/// Produces no dependency arcs, so only the linear negation window can
/// apply to its output. Lemmas are lowercased surface forms.
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser;

impl PlainTextParser {
    pub fn new() -> Self {
        Self
    }

    fn is_sentence_end(segment: &str) -> bool {
        !segment.is_empty() && segment.chars().all(|c| matches!(c, '.' | '!' | '?' | '…'))
    }

    fn is_punct(segment: &str) -> bool {
        segment.chars().all(|c| !c.is_alphanumeric())
    }
}

impl Parser for PlainTextParser {
    fn parse(&self, text: &str) -> Result<Document, ProcessError> {
        let mut builder = DocumentBuilder::new(text);
        let mut sentence: Vec<TokenSpec> = Vec::new();

        for segment in text.split_word_bounds() {
            if segment.trim().is_empty() {
                if let Some(last) = sentence.last_mut() {
                    last.whitespace_after = true;
                }
                continue;
            }

            let mut spec = TokenSpec::new(segment).no_space();
            if Self::is_punct(segment) {
                spec = spec.punct().no_space();
            } else if STOP_WORDS.contains(&spec.lemma.as_str()) {
                spec = spec.stop();
            }
            sentence.push(spec);

            if Self::is_sentence_end(segment) {
                builder.push_sentence(std::mem::take(&mut sentence));
            }
        }
        builder.push_sentence(sentence);

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmas(doc: &Document) -> Vec<&str> {
        doc.tokens().iter().map(|t| t.lemma.as_str()).collect()
    }

    #[test]
    fn test_tokenizes_words_and_punctuation() {
        let doc = PlainTextParser::new().parse("Ez egy nagyon jó termék.").unwrap();
        assert_eq!(lemmas(&doc), vec!["ez", "egy", "nagyon", "jó", "termék", "."]);
        assert_eq!(doc.sentence_count(), 1);
        assert!(doc.tokens()[5].is_punct);
        assert!(doc.tokens()[0].is_stop);
        assert!(!doc.tokens()[3].is_stop);
    }

    #[test]
    fn test_splits_sentences_on_terminal_punctuation() {
        let doc = PlainTextParser::new()
            .parse("Jó volt. Nem tetszett! Miért?")
            .unwrap();
        assert_eq!(doc.sentence_count(), 3);
        assert_eq!(doc.sentence_text(0).unwrap(), "Jó volt.");
        assert_eq!(doc.sentence_text(1).unwrap(), "Nem tetszett!");
        assert_eq!(doc.sentence_text(2).unwrap(), "Miért?");
    }

    #[test]
    fn test_trailing_text_without_punctuation_is_a_sentence() {
        let doc = PlainTextParser::new().parse("Jó. Rossz").unwrap();
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.sentence_text(1).unwrap(), "Rossz");
    }

    #[test]
    fn test_no_dependency_arcs() {
        let doc = PlainTextParser::new().parse("Nem jó.").unwrap();
        assert!(doc.tokens().iter().all(|t| t.head.is_none() && t.children.is_empty()));
    }

    #[test]
    fn test_empty_text() {
        let doc = PlainTextParser::new().parse("   ").unwrap();
        assert_eq!(doc.tokens().len(), 0);
        assert_eq!(doc.sentence_count(), 0);
    }
}
