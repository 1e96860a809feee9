//! Negation scope resolution.
//!
//! A lexicon hit is negated when one of three cues holds, checked in order:
//!
//! ```text
//!   nem  volt  jó        jó ─head─> nem?      (head cue)
//!   jó ─child─> nem                           (child cue)
//!   [nem] egy igazán  jó  (window cue, up to N tokens back)
//! ```
//!
//! Every lookup goes through a sentence [`TokenView`], so a negator in a
//! neighbouring sentence can never reach across the boundary.

use crate::Lexicon;
use layered_sentiment_document::{TokenId, TokenView};
use serde::Serialize;
use std::fmt;

/// Which check found the negator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NegationRule {
    /// A direct dependent of the token is a negator
    Child,
    /// The syntactic head of the token is a negator
    Head,
    /// A negator precedes the token within the look-back window
    Window,
}

impl NegationRule {
    pub fn as_str(self) -> &'static str {
        match self {
            NegationRule::Child => "child",
            NegationRule::Head => "head",
            NegationRule::Window => "window",
        }
    }
}

impl fmt::Display for NegationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The negator that put a token in negative scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NegationCue {
    pub rule: NegationRule,
    /// Arena id of the negator token
    pub negator: TokenId,
}

/// Decides whether a token lies under negation.
#[derive(Debug, Clone, Copy)]
pub struct NegationScopeResolver<'l> {
    lexicon: &'l Lexicon,
}

impl<'l> NegationScopeResolver<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self { lexicon }
    }

    /// Whether `token` is negated within `sentence`.
    ///
    /// Returns `false` for ids outside the view.
    pub fn is_negated(&self, token: TokenId, sentence: &TokenView<'_>) -> bool {
        self.negation_cue(token, sentence).is_some()
    }

    /// The first cue (child, then head, then window) negating `token`.
    pub fn negation_cue(&self, token: TokenId, sentence: &TokenView<'_>) -> Option<NegationCue> {
        let target = sentence.get(token)?;

        for &child in &target.children {
            if let Some(child_token) = sentence.get(child) {
                if self.lexicon.is_negator(&child_token.lemma) {
                    return Some(NegationCue {
                        rule: NegationRule::Child,
                        negator: child,
                    });
                }
            }
        }

        if let Some(head) = target.head {
            if let Some(head_token) = sentence.get(head) {
                if self.lexicon.is_negator(&head_token.lemma) {
                    return Some(NegationCue {
                        rule: NegationRule::Head,
                        negator: head,
                    });
                }
            }
        }

        let window_start = token
            .0
            .saturating_sub(self.lexicon.negation_window())
            .max(sentence.start());
        (window_start..token.0)
            .map(TokenId)
            .find(|id| {
                sentence
                    .get(*id)
                    .map_or(false, |t| self.lexicon.is_negator(&t.lemma))
            })
            .map(|negator| NegationCue {
                rule: NegationRule::Window,
                negator,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layered_sentiment_document::{Document, DocumentBuilder, TokenSpec};

    fn resolve(doc: &Document, sentence: usize, token: usize) -> Option<NegationCue> {
        let lexicon = Lexicon::hungarian();
        let view = doc.sentence_view(sentence).unwrap();
        NegationScopeResolver::new(&lexicon).negation_cue(TokenId(token), &view)
    }

    #[test]
    fn test_child_negator() {
        // nem <-advmod- jó
        let doc = DocumentBuilder::new("nem jó")
            .sentence(vec![TokenSpec::new("nem").head(1), TokenSpec::new("jó")])
            .build()
            .unwrap();
        let cue = resolve(&doc, 0, 1).unwrap();
        assert_eq!(cue.rule, NegationRule::Child);
        assert_eq!(cue.negator, TokenId(0));
    }

    #[test]
    fn test_head_negator() {
        let doc = DocumentBuilder::new("jó nem")
            .sentence(vec![TokenSpec::new("jó").head(1), TokenSpec::new("nem")])
            .build()
            .unwrap();
        assert_eq!(resolve(&doc, 0, 0).unwrap().rule, NegationRule::Head);
    }

    #[test]
    fn test_window_reaches_five_back() {
        let doc = DocumentBuilder::new("nem a b c d jó")
            .sentence(vec![
                TokenSpec::new("nem"),
                TokenSpec::new("a"),
                TokenSpec::new("b"),
                TokenSpec::new("c"),
                TokenSpec::new("d"),
                TokenSpec::new("jó"),
            ])
            .build()
            .unwrap();
        let cue = resolve(&doc, 0, 5).unwrap();
        assert_eq!(cue.rule, NegationRule::Window);
        assert_eq!(cue.negator, TokenId(0));
    }

    #[test]
    fn test_window_stops_after_five() {
        let doc = DocumentBuilder::new("nem a b c d e jó")
            .sentence(vec![
                TokenSpec::new("nem"),
                TokenSpec::new("a"),
                TokenSpec::new("b"),
                TokenSpec::new("c"),
                TokenSpec::new("d"),
                TokenSpec::new("e"),
                TokenSpec::new("jó"),
            ])
            .build()
            .unwrap();
        assert!(resolve(&doc, 0, 6).is_none());
    }

    #[test]
    fn test_negator_after_token_is_ignored() {
        let doc = DocumentBuilder::new("jó nem")
            .sentence(vec![TokenSpec::new("jó"), TokenSpec::new("nem")])
            .build()
            .unwrap();
        assert!(resolve(&doc, 0, 0).is_none());
    }

    #[test]
    fn test_previous_sentence_is_out_of_scope() {
        let doc = DocumentBuilder::new("Nem. Jó.")
            .sentence(vec![TokenSpec::new("Nem").no_space(), TokenSpec::new(".").punct()])
            .sentence(vec![TokenSpec::new("Jó").no_space(), TokenSpec::new(".").punct()])
            .build()
            .unwrap();
        assert!(resolve(&doc, 1, 2).is_none());

        // Same token seen through the whole-document view, clamped back to its sentence.
        let lexicon = Lexicon::hungarian();
        let view = doc.view();
        let sentence = view.sentence_of(TokenId(2)).unwrap();
        assert!(!NegationScopeResolver::new(&lexicon).is_negated(TokenId(2), &sentence));
    }

    #[test]
    fn test_child_outranks_window() {
        let doc = DocumentBuilder::new("soha nem jó")
            .sentence(vec![
                TokenSpec::new("soha"),
                TokenSpec::new("nem").head(2),
                TokenSpec::new("jó"),
            ])
            .build()
            .unwrap();
        let cue = resolve(&doc, 0, 2).unwrap();
        assert_eq!(cue.rule, NegationRule::Child);
        assert_eq!(cue.negator, TokenId(1));
    }

    #[test]
    fn test_custom_window() {
        let lexicon = Lexicon::builder().negators(["not"]).negation_window(1).build();
        let doc = DocumentBuilder::new("not very good")
            .sentence(vec![
                TokenSpec::new("not"),
                TokenSpec::new("very"),
                TokenSpec::new("good"),
            ])
            .build()
            .unwrap();
        let view = doc.sentence_view(0).unwrap();
        let resolver = NegationScopeResolver::new(&lexicon);
        assert!(!resolver.is_negated(TokenId(2), &view));
        assert!(resolver.is_negated(TokenId(1), &view));
    }
}
