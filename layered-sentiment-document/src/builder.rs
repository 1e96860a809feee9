//! Building documents from per-sentence token specifications.

use crate::document::{Document, Entity, ProcessError, Sentence, Token, TokenId};

/// Description of one token before it is linked into a document.
///
/// `head` is sentence-relative; `None` marks the sentence root.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSpec {
    pub text: String,
    pub lemma: String,
    pub pos: String,
    pub dep: String,
    pub head: Option<usize>,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_space: bool,
    pub whitespace_after: bool,
}

impl TokenSpec {
    /// A token whose lemma is its lowercased surface form.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            lemma: text.to_lowercase(),
            text,
            pos: "X".to_string(),
            dep: "dep".to_string(),
            head: None,
            is_stop: false,
            is_punct: false,
            is_space: false,
            whitespace_after: true,
        }
    }

    pub fn lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into().to_lowercase();
        self
    }

    pub fn pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = pos.into();
        self
    }

    pub fn dep(mut self, dep: impl Into<String>) -> Self {
        self.dep = dep.into();
        self
    }

    pub fn head(mut self, head: usize) -> Self {
        self.head = Some(head);
        self
    }

    pub fn stop(mut self) -> Self {
        self.is_stop = true;
        self
    }

    pub fn punct(mut self) -> Self {
        self.is_punct = true;
        self.pos = "PUNCT".to_string();
        self.dep = "punct".to_string();
        self
    }

    pub fn space(mut self) -> Self {
        self.is_space = true;
        self.pos = "SPACE".to_string();
        self
    }

    /// The token is directly followed by the next one.
    pub fn no_space(mut self) -> Self {
        self.whitespace_after = false;
        self
    }
}

/// Incrementally assembles a [`Document`].
///
/// ```
/// use layered_sentiment_document::{DocumentBuilder, TokenSpec};
///
/// let doc = DocumentBuilder::new("Nem jó.")
///     .sentence(vec![
///         TokenSpec::new("Nem").head(1),
///         TokenSpec::new("jó").no_space(),
///         TokenSpec::new(".").punct().head(1),
///     ])
///     .build()
///     .unwrap();
/// assert_eq!(doc.tokens().len(), 3);
/// assert_eq!(doc.tokens()[1].children.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    text: String,
    sentences: Vec<Vec<TokenSpec>>,
    entities: Vec<Entity>,
}

impl DocumentBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sentences: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Append a sentence. Empty sentences are ignored.
    pub fn sentence(mut self, tokens: Vec<TokenSpec>) -> Self {
        self.push_sentence(tokens);
        self
    }

    pub fn push_sentence(&mut self, tokens: Vec<TokenSpec>) {
        if !tokens.is_empty() {
            self.sentences.push(tokens);
        }
    }

    pub fn entity(mut self, text: impl Into<String>, label: impl Into<String>) -> Self {
        self.push_entity(text, label);
        self
    }

    pub fn push_entity(&mut self, text: impl Into<String>, label: impl Into<String>) {
        self.entities.push(Entity {
            text: text.into(),
            label: label.into(),
        });
    }

    /// Link heads and children into the arena and validate every head.
    pub fn build(self) -> Result<Document, ProcessError> {
        let mut tokens = Vec::new();
        let mut sentences = Vec::with_capacity(self.sentences.len());

        for (sentence_idx, specs) in self.sentences.into_iter().enumerate() {
            let start = tokens.len();
            let len = specs.len();

            for (position, spec) in specs.into_iter().enumerate() {
                let head = match spec.head {
                    Some(head) if head >= len => {
                        return Err(ProcessError::InvalidHead {
                            sentence: sentence_idx,
                            token: position,
                            head,
                        });
                    }
                    Some(head) if head == position => None,
                    Some(head) => Some(TokenId(start + head)),
                    None => None,
                };

                tokens.push(Token {
                    text: spec.text,
                    lemma: spec.lemma,
                    pos: spec.pos,
                    dep: spec.dep,
                    head,
                    children: Vec::new(),
                    is_stop: spec.is_stop,
                    is_punct: spec.is_punct,
                    is_space: spec.is_space,
                    whitespace_after: spec.whitespace_after,
                    sentence: sentence_idx,
                    position,
                });
            }

            sentences.push(Sentence {
                start,
                end: tokens.len(),
            });
        }

        for idx in 0..tokens.len() {
            if let Some(head) = tokens[idx].head {
                tokens[head.0].children.push(TokenId(idx));
            }
        }

        Ok(Document::from_parts(self.text, tokens, sentences, self.entities))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_derived_from_heads() {
        let doc = DocumentBuilder::new("Ez nagyon jó")
            .sentence(vec![
                TokenSpec::new("Ez").head(2),
                TokenSpec::new("nagyon").dep("advmod").head(2),
                TokenSpec::new("jó").dep("ROOT"),
            ])
            .build()
            .unwrap();

        let jo = &doc.tokens()[2];
        assert_eq!(jo.children, vec![TokenId(0), TokenId(1)]);
        assert_eq!(doc.tokens()[1].head, Some(TokenId(2)));
        assert_eq!(jo.head, None);
    }

    #[test]
    fn test_positions_are_sentence_relative() {
        let doc = DocumentBuilder::new("A b. C d.")
            .sentence(vec![TokenSpec::new("A"), TokenSpec::new("b")])
            .sentence(vec![TokenSpec::new("C"), TokenSpec::new("d").head(0)])
            .build()
            .unwrap();

        let d = &doc.tokens()[3];
        assert_eq!(d.sentence, 1);
        assert_eq!(d.position, 1);
        assert_eq!(d.head, Some(TokenId(2)));
    }

    #[test]
    fn test_head_outside_sentence_rejected() {
        let err = DocumentBuilder::new("x")
            .sentence(vec![TokenSpec::new("x").head(4)])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ProcessError::InvalidHead {
                sentence: 0,
                token: 0,
                head: 4
            }
        );
    }

    #[test]
    fn test_self_head_is_root() {
        let doc = DocumentBuilder::new("x")
            .sentence(vec![TokenSpec::new("x").head(0)])
            .build()
            .unwrap();
        assert_eq!(doc.tokens()[0].head, None);
        assert!(doc.tokens()[0].children.is_empty());
    }

    #[test]
    fn test_lemma_lowercased() {
        let spec = TokenSpec::new("Kiváló");
        assert_eq!(spec.lemma, "kiváló");
        assert_eq!(TokenSpec::new("x").lemma("JÓ").lemma, "jó");
    }
}
