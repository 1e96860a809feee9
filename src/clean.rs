//! Text cleaning applied to every row before parsing and classification.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Strip markup and links, collapse whitespace runs, trim.
pub fn clean_text(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, " ");
    let text = URL.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(
            clean_text("<p>Nagyon <b>jó</b></p> előadás,\n\n lásd https://example.hu/x?y=1 itt."),
            "Nagyon jó előadás, lásd itt."
        );
        assert_eq!(clean_text("   \t\n"), "");
        assert_eq!(clean_text("http://a.b"), "");
    }
}
