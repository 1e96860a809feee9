//! Parsed-document abstractions.
//!
//! A [`Document`] owns every token of one input row in a flat arena.
//! Sentences are half-open ranges into that arena, and dependency arcs
//! (head and children) are [`TokenId`] indices rather than references, so
//! head/child cycles never need shared ownership.
//!
//! [`TokenView`] is the read-only window the scorers work on: either the
//! whole document or a single sentence. Lookups through a view never return
//! tokens outside of it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a token within its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One linguistically annotated token, as produced by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form
    pub text: String,
    /// Normalized lowercase lemma
    pub lemma: String,
    /// Universal part-of-speech tag
    pub pos: String,
    /// Dependency relation to the head
    pub dep: String,
    /// Syntactic head (`None` for the sentence root)
    pub head: Option<TokenId>,
    /// Direct syntactic dependents, in linear order
    pub children: Vec<TokenId>,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_space: bool,
    /// Whether the surface text is followed by whitespace
    pub whitespace_after: bool,
    /// Index of the sentence this token belongs to
    pub sentence: usize,
    /// Position within the sentence (0-based)
    pub position: usize,
}

/// A sentence: a half-open range `[start, end)` into the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
}

impl Sentence {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, id: TokenId) -> bool {
        id.0 >= self.start && id.0 < self.end
    }
}

/// A named entity reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

/// One parsed input row.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    sentences: Vec<Sentence>,
    entities: Vec<Entity>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("token_count", &self.tokens.len())
            .field("sentence_count", &self.sentences.len())
            .field("text_len", &self.text.len())
            .finish()
    }
}

impl Document {
    /// Assemble a document from already-linked parts.
    ///
    /// Prefer [`DocumentBuilder`](crate::DocumentBuilder), which derives
    /// children, positions and sentence ranges and validates heads.
    pub(crate) fn from_parts(
        text: String,
        tokens: Vec<Token>,
        sentences: Vec<Sentence>,
        entities: Vec<Entity>,
    ) -> Self {
        Self {
            text,
            tokens,
            sentences,
            entities,
        }
    }

    /// A document with no tokens.
    pub fn empty(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tokens: Vec::new(),
            sentences: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// The cleaned text the document was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Reconstruct the text of one sentence from its tokens.
    pub fn sentence_text(&self, index: usize) -> Option<String> {
        let sentence = self.sentences.get(index)?;
        let mut text = String::new();
        let tokens = &self.tokens[sentence.start..sentence.end];
        for (i, token) in tokens.iter().enumerate() {
            text.push_str(&token.text);
            if token.whitespace_after && i + 1 < tokens.len() {
                text.push(' ');
            }
        }
        Some(text)
    }

    /// View over every token in the document.
    pub fn view(&self) -> TokenView<'_> {
        TokenView {
            tokens: &self.tokens,
            sentences: &self.sentences,
            start: 0,
            end: self.tokens.len(),
        }
    }

    /// View restricted to one sentence.
    pub fn sentence_view(&self, index: usize) -> Option<TokenView<'_>> {
        let sentence = self.sentences.get(index)?;
        Some(TokenView {
            tokens: &self.tokens,
            sentences: &self.sentences,
            start: sentence.start,
            end: sentence.end,
        })
    }

    /// Number of tokens that are not whitespace.
    pub fn non_space_count(&self) -> usize {
        self.view().non_space_count()
    }
}

/// Borrowed window `[start, end)` over a document's token arena.
#[derive(Clone, Copy)]
pub struct TokenView<'a> {
    tokens: &'a [Token],
    sentences: &'a [Sentence],
    start: usize,
    end: usize,
}

impl<'a> std::fmt::Debug for TokenView<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenView")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a> TokenView<'a> {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, id: TokenId) -> bool {
        id.0 >= self.start && id.0 < self.end
    }

    /// Token lookup; `None` for ids outside this view.
    pub fn get(&self, id: TokenId) -> Option<&'a Token> {
        if self.contains(id) {
            self.tokens.get(id.0)
        } else {
            None
        }
    }

    /// Tokens in linear order with their arena ids.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &'a Token)> + 'a {
        let start = self.start;
        let tokens: &'a [Token] = self.tokens;
        tokens[self.start..self.end]
            .iter()
            .enumerate()
            .map(move |(offset, token)| (TokenId(start + offset), token))
    }

    /// The syntactic head of `token`, if it lies inside this view.
    pub fn head_of(&self, token: &Token) -> Option<&'a Token> {
        token.head.and_then(|id| self.get(id))
    }

    /// Direct dependents of `token` that lie inside this view.
    pub fn children_of<'t>(&self, token: &'t Token) -> impl Iterator<Item = &'a Token> + 't
    where
        'a: 't,
    {
        let view = *self;
        token.children.iter().filter_map(move |id| view.get(*id))
    }

    /// Number of tokens in the view that are not whitespace.
    pub fn non_space_count(&self) -> usize {
        self.tokens[self.start..self.end]
            .iter()
            .filter(|t| !t.is_space)
            .count()
    }

    /// The part of this view that belongs to the sentence containing `id`.
    pub fn sentence_of(&self, id: TokenId) -> Option<TokenView<'a>> {
        let token = self.get(id)?;
        let sentence = self.sentences.get(token.sentence)?;
        Some(TokenView {
            tokens: self.tokens,
            sentences: self.sentences,
            start: sentence.start.max(self.start),
            end: sentence.end.min(self.end),
        })
    }

    /// First arena index covered by this view.
    pub fn start(&self) -> usize {
        self.start
    }
}

/// Errors reported by the parsing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// A token names a head outside its sentence
    #[error("sentence {sentence}: token {token} has head {head} outside the sentence")]
    InvalidHead {
        sentence: usize,
        token: usize,
        head: usize,
    },
    /// A CoNLL-U row could not be read
    #[error("conllu line {line}: {message}")]
    Conllu { line: usize, message: String },
    /// The parser itself failed or is not loaded
    #[error("parser unavailable: {0}")]
    Unavailable(String),
}
