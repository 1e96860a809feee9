//! Parsed-document model for layered-sentiment.
//!
//! This crate is the boundary with the linguistic parser: it defines the
//! annotated token arena the scorers read, the [`Parser`] seam, and two
//! ways of producing documents without a live parser.
//!
//! ## Core Types
//!
//! - [`Document`] - One input row: text, token arena, sentences, entities
//! - [`Token`] / [`TokenId`] - Annotated tokens linked by arena indices
//! - [`TokenView`] - A document or sentence window used for scoring
//! - [`DocumentBuilder`] / [`TokenSpec`] - Assemble documents by hand
//! - [`PlainTextParser`] - Word-boundary fallback tokenizer
//! - [`parse_conllu`] / [`ConlluCorpus`] - Read dependency parses in CoNLL-U
//!
//! ## Example
//!
//! ```
//! use layered_sentiment_document::{Parser, PlainTextParser};
//!
//! let doc = PlainTextParser::new().parse("Jó volt. Nem tetszett.").unwrap();
//! assert_eq!(doc.sentence_count(), 2);
//! ```

mod builder;
mod conllu;
mod document;
mod parser;

pub use builder::{DocumentBuilder, TokenSpec};
pub use conllu::{parse_conllu, ConlluCorpus};
pub use document::{Document, Entity, ProcessError, Sentence, Token, TokenId, TokenView};
pub use parser::{Parser, PlainTextParser};
