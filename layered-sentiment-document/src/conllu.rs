//! Reading parser output in CoNLL-U form.
//!
//! Sentences are separated by blank lines. Multi-word token ranges
//! (`1-2`) and empty nodes (`1.1`) are skipped. `SpaceAfter=No` in MISC
//! controls whitespace, and `NER=B-LABEL` / `NER=I-LABEL` tags in MISC are
//! collected into entities.

use std::collections::HashMap;

use crate::builder::{DocumentBuilder, TokenSpec};
use crate::document::{Document, ProcessError};
use crate::parser::Parser;

/// Parse one CoNLL-U document.
///
/// The document text is taken from `# text = ...` comments when present,
/// otherwise it is rebuilt from the surface forms.
pub fn parse_conllu(input: &str) -> Result<Document, ProcessError> {
    let mut texts: Vec<String> = Vec::new();
    let mut sentences: Vec<Vec<TokenSpec>> = Vec::new();
    let mut current: Vec<TokenSpec> = Vec::new();
    let mut entities: Vec<(String, String)> = Vec::new();
    let mut open_entity: Option<(String, String)> = None;

    for (line_idx, raw_line) in input.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = raw_line.trim_end_matches('\r');

        if line.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            entities.extend(open_entity.take());
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(text) = comment.trim_start().strip_prefix("text =") {
                texts.push(text.trim().to_string());
            }
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 10 {
            return Err(ProcessError::Conllu {
                line: line_no,
                message: format!("expected 10 columns, found {}", columns.len()),
            });
        }

        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            continue;
        }
        let id: usize = id.parse().map_err(|_| ProcessError::Conllu {
            line: line_no,
            message: format!("invalid token id '{}'", id),
        })?;
        if id != current.len() + 1 {
            return Err(ProcessError::Conllu {
                line: line_no,
                message: format!("expected token id {}, found {}", current.len() + 1, id),
            });
        }

        let form = columns[1];
        let mut spec = TokenSpec::new(form);
        if columns[2] != "_" {
            spec = spec.lemma(columns[2]);
        }
        spec = spec.pos(columns[3]).dep(columns[7]);

        match columns[6] {
            "_" | "0" => {}
            head => {
                let head: usize = head.parse().map_err(|_| ProcessError::Conllu {
                    line: line_no,
                    message: format!("invalid head '{}'", head),
                })?;
                let head = head.checked_sub(1).ok_or_else(|| ProcessError::Conllu {
                    line: line_no,
                    message: "head 0 written with a leading zero".to_string(),
                })?;
                spec = spec.head(head);
            }
        }

        match columns[3] {
            "PUNCT" => spec.is_punct = true,
            "SPACE" => spec.is_space = true,
            _ => {}
        }

        let mut ner: Option<&str> = None;
        for item in columns[9].split('|') {
            match item {
                "SpaceAfter=No" => spec.whitespace_after = false,
                "Stop=Yes" => spec.is_stop = true,
                _ => {
                    if let Some(tag) = item.strip_prefix("NER=") {
                        ner = Some(tag);
                    }
                }
            }
        }

        match ner.and_then(|tag| tag.split_once('-')) {
            Some(("B", label)) => {
                entities.extend(open_entity.take());
                open_entity = Some((form.to_string(), label.to_string()));
            }
            Some(("I", label)) => match open_entity.as_mut() {
                Some((text, open_label)) if open_label == label => {
                    text.push(' ');
                    text.push_str(form);
                }
                _ => {
                    entities.extend(open_entity.take());
                    open_entity = Some((form.to_string(), label.to_string()));
                }
            },
            _ => entities.extend(open_entity.take()),
        }

        current.push(spec);
    }

    if !current.is_empty() {
        sentences.push(current);
    }
    entities.extend(open_entity.take());

    let text = if texts.is_empty() {
        rebuild_text(&sentences)
    } else {
        texts.join(" ")
    };

    let mut builder = DocumentBuilder::new(text);
    for sentence in sentences {
        builder.push_sentence(sentence);
    }
    for (text, label) in entities {
        builder.push_entity(text, label);
    }
    builder.build()
}

fn rebuild_text(sentences: &[Vec<TokenSpec>]) -> String {
    let mut text = String::new();
    for spec in sentences.iter().flatten() {
        text.push_str(&spec.text);
        if spec.whitespace_after {
            text.push(' ');
        }
    }
    text.trim_end().to_string()
}

/// Pre-parsed documents keyed by their text.
///
/// Lets output from an offline parser run stand in for a live parser: a
/// lookup miss is reported as [`ProcessError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct ConlluCorpus {
    documents: HashMap<String, Document>,
}

impl ConlluCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and register one CoNLL-U document under its text.
    pub fn insert(&mut self, conllu: &str) -> Result<&Document, ProcessError> {
        let document = parse_conllu(conllu)?;
        let key = document.text().to_string();
        self.documents.insert(key.clone(), document);
        Ok(&self.documents[&key])
    }

    /// Parse a stream of documents separated by `# newdoc` comments.
    pub fn from_conllu_stream(input: &str) -> Result<Self, ProcessError> {
        let mut corpus = Self::new();
        let mut chunk = String::new();

        for line in input.lines() {
            if line.trim_start().starts_with("# newdoc") && !chunk.trim().is_empty() {
                corpus.insert(&chunk)?;
                chunk.clear();
            }
            chunk.push_str(line);
            chunk.push('\n');
        }
        if !chunk.trim().is_empty() {
            corpus.insert(&chunk)?;
        }

        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Parser for ConlluCorpus {
    fn parse(&self, text: &str) -> Result<Document, ProcessError> {
        self.documents.get(text).cloned().ok_or_else(|| {
            let preview: String = text.chars().take(40).collect();
            ProcessError::Unavailable(format!("no parse for '{}'", preview))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenId;

    const NEM_JO: &str = "# text = Ez nem jó.
1\tEz\tez\tPRON\t_\t_\t3\tnsubj\t_\t_
2\tnem\tnem\tADV\t_\t_\t3\tadvmod:neg\t_\t_
3\tjó\tjó\tADJ\t_\t_\t0\troot\t_\tSpaceAfter=No
4\t.\t.\tPUNCT\t_\t_\t3\tpunct\t_\t_
";

    #[test]
    fn test_parse_single_sentence() {
        let doc = parse_conllu(NEM_JO).unwrap();
        assert_eq!(doc.text(), "Ez nem jó.");
        assert_eq!(doc.tokens().len(), 4);
        assert_eq!(doc.sentence_count(), 1);

        let jo = &doc.tokens()[2];
        assert_eq!(jo.head, None);
        assert_eq!(jo.children, vec![TokenId(0), TokenId(1), TokenId(3)]);
        assert!(!jo.whitespace_after);
        assert!(doc.tokens()[3].is_punct);
        assert_eq!(doc.tokens()[1].dep, "advmod:neg");
    }

    #[test]
    fn test_multiple_sentences_and_skipped_ranges() {
        let input = "1-2\tdel\t_\t_\t_\t_\t_\t_\t_\t_
1\tJó\tjó\tADJ\t_\t_\t0\troot\t_\tSpaceAfter=No
2\t.\t.\tPUNCT\t_\t_\t1\tpunct\t_\t_

1\tRossz\trossz\tADJ\t_\t_\t0\troot\t_\tSpaceAfter=No
1.1\tx\t_\t_\t_\t_\t_\t_\t_\t_
2\t!\t!\tPUNCT\t_\t_\t1\tpunct\t_\t_
";
        let doc = parse_conllu(input).unwrap();
        assert_eq!(doc.sentence_count(), 2);
        assert_eq!(doc.text(), "Jó. Rossz!");
        assert_eq!(doc.tokens()[3].head, Some(TokenId(2)));
    }

    #[test]
    fn test_named_entities_from_misc() {
        let input = "1\tKovács\tkovács\tPROPN\t_\t_\t3\tnsubj\t_\tNER=B-PER
2\tAnna\tanna\tPROPN\t_\t_\t1\tflat:name\t_\tNER=I-PER
3\ttanított\ttanít\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No
4\t.\t.\tPUNCT\t_\t_\t3\tpunct\t_\t_
";
        let doc = parse_conllu(input).unwrap();
        assert_eq!(doc.entities().len(), 1);
        assert_eq!(doc.entities()[0].text, "Kovács Anna");
        assert_eq!(doc.entities()[0].label, "PER");
    }

    #[test]
    fn test_wrong_column_count_is_an_error() {
        let err = parse_conllu("1\tjó\tjó\n").unwrap_err();
        assert!(matches!(err, ProcessError::Conllu { line: 1, .. }));
        insta::assert_snapshot!(err.to_string(), @"conllu line 1: expected 10 columns, found 3");
    }

    #[test]
    fn test_zero_padded_root_head_is_an_error() {
        let err = parse_conllu("1\tjó\tjó\tADJ\t_\t_\t00\troot\t_\t_\n").unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"conllu line 1: head 0 written with a leading zero"
        );
    }

    #[test]
    fn test_out_of_sequence_id_is_an_error() {
        let err = parse_conllu("2\tjó\tjó\tADJ\t_\t_\t0\troot\t_\t_\n").unwrap_err();
        assert!(matches!(err, ProcessError::Conllu { line: 1, .. }));
    }

    #[test]
    fn test_corpus_lookup() {
        let stream = format!("# newdoc\n{}\n# newdoc\n# text = Jó.\n1\tJó\tjó\tADJ\t_\t_\t0\troot\t_\t_\n", NEM_JO);
        let corpus = ConlluCorpus::from_conllu_stream(&stream).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.parse("Ez nem jó.").unwrap().tokens().len(), 4);
        assert!(matches!(
            corpus.parse("ismeretlen"),
            Err(ProcessError::Unavailable(_))
        ));
    }
}
