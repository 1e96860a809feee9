//! Debug rendering of scored sentences.

use crate::{LexicalBreakdown, LexicalScorer};
use layered_sentiment_document::TokenView;
use std::fmt::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Renders one sentence with its lexicon hits and negation cues underneath.
///
/// ```text
/// Ez  nem  jó  .
///          ╰╯NegatedPositive(-0.50)
///            └─¬window─>nem
/// ```
pub struct SentenceDisplay<'a> {
    view: TokenView<'a>,
    breakdown: LexicalBreakdown,
}

impl<'a> SentenceDisplay<'a> {
    pub fn new(view: &TokenView<'a>, scorer: &LexicalScorer<'_>) -> Self {
        Self {
            view: *view,
            breakdown: scorer.explain(view),
        }
    }

    pub fn breakdown(&self) -> &LexicalBreakdown {
        &self.breakdown
    }
}

impl<'a> fmt::Display for SentenceDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SPACE_PADDING: usize = 2;
        let offset = self.view.start();
        let mut starts = Vec::with_capacity(self.view.len());
        let mut ends = Vec::with_capacity(self.view.len());

        let mut opening_line = String::new();
        for (i, (_, token)) in self.view.iter().enumerate() {
            if i > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            starts.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(&token.text);
            ends.push(UnicodeWidthStr::width(&*opening_line));
        }
        f.write_str(&opening_line)?;

        for contribution in &self.breakdown.contributions {
            let index = contribution.token.0 - offset;
            let (start, end) = (starts[index], ends[index]);

            f.write_char('\n')?;
            for _ in 0..start {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;
            for _ in (start + 1)..end.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end - start > 1 {
                f.write_char('╯')?;
            }
            write!(f, "{}", contribution)?;

            if let Some(cue) = contribution.negation {
                let negator = self.view.get(cue.negator).map_or("?", |t| t.text.as_str());
                f.write_char('\n')?;
                for _ in 0..start + 2 {
                    f.write_char(' ')?;
                }
                write!(f, "└─¬{}─>{}", cue.rule, negator)?;
            }
        }

        Ok(())
    }
}
