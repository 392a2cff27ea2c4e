//! Citation marker counting

use regex::Regex;
use std::sync::OnceLock;

static REF_OPEN: OnceLock<Regex> = OnceLock::new();

fn ref_pattern() -> &'static Regex {
    REF_OPEN.get_or_init(|| Regex::new(r"(?i)<ref[^>]*>").unwrap())
}

/// Count `<ref ...>` opening tags. Closing `</ref>` tags are not counted.
pub fn count_citations(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    ref_pattern().find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_opening_tags_only() {
        assert_eq!(count_citations(r#"<ref>a</ref><ref name="x">b</ref>"#), 2);
    }

    #[test]
    fn test_single_and_multiple() {
        assert_eq!(count_citations("This is a statement.<ref>Source</ref>"), 1);
        assert_eq!(
            count_citations("First.<ref>Source1</ref> Second.<ref>Source2</ref>"),
            2
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(count_citations("<REF>Source</REF> and <Ref>Another</Ref>"), 2);
    }

    #[test]
    fn test_self_closing_named_ref() {
        assert_eq!(count_citations(r#"Claim.<ref name="ipcc" />"#), 1);
    }

    #[test]
    fn test_empty_and_plain_text() {
        assert_eq!(count_citations(""), 0);
        assert_eq!(count_citations("This is a statement without citations."), 0);
    }
}
