//! Biased phrase detection
//!
//! Scans text against four fixed phrase categories:
//! - `loaded_language` - certainty adverbs, absolute modals, strong affect
//! - `opinionated` - first-person cognition, vague authority, passive consensus
//! - `unbalanced` - causal minimization, evidence denial, absolute negation
//! - `political` - ideological labels, fringe/mainstream framing, loaded nouns
//!
//! The score is the match count per 1000 characters. Texts shorter than
//! 1000 characters are divided by one unit, so they are never inflated.

use crate::models::{BiasAssessment, BiasCategory, PhraseMatch};
use regex::Regex;
use std::sync::OnceLock;

/// Characters of context kept on each side of a match
const CONTEXT_CHARS: usize = 50;

/// Maximum phrases returned per text
const MAX_REPORTED_PHRASES: usize = 10;

static PHRASE_PATTERNS: OnceLock<Vec<PhrasePattern>> = OnceLock::new();

struct PhrasePattern {
    category: BiasCategory,
    pattern: Regex,
}

impl PhrasePattern {
    fn new(category: BiasCategory, body: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(&format!(r"(?i)\b{body}\b")).unwrap(),
        }
    }
}

/// Category-ordered pattern table, compiled on first use
fn get_patterns() -> &'static Vec<PhrasePattern> {
    PHRASE_PATTERNS.get_or_init(|| {
        use BiasCategory::*;
        vec![
            // Loaded language
            PhrasePattern::new(
                LoadedLanguage,
                r"(clearly|obviously|undoubtedly|certainly|definitely|undeniably)",
            ),
            PhrasePattern::new(
                LoadedLanguage,
                r"(should|must|ought\s+to|need\s+to)\s+(always|never|only)",
            ),
            PhrasePattern::new(
                LoadedLanguage,
                r"(terrible|awful|horrible|disastrous|catastrophic|amazing|incredible|fantastic|brilliant|perfect)",
            ),
            PhrasePattern::new(
                LoadedLanguage,
                r"(controversial|disputed|questionable|dubious)",
            ),
            // Opinionated statements
            PhrasePattern::new(
                Opinionated,
                r"(I|we|our|us)\s+(believe|think|feel|argue|claim|assert)",
            ),
            PhrasePattern::new(
                Opinionated,
                r"(many|most|some)\s+(people|experts|scientists)\s+(believe|think|argue)",
            ),
            PhrasePattern::new(
                Opinionated,
                r"(it\s+is|it's)\s+(widely|commonly|generally)\s+(believed|thought|accepted)",
            ),
            // Unbalanced perspective
            PhrasePattern::new(
                Unbalanced,
                r"(only|merely|just|simply)\s+(because|due\s+to|as\s+a\s+result\s+of)",
            ),
            PhrasePattern::new(
                Unbalanced,
                r"(without|lacking|missing)\s+(any|adequate|sufficient|proper)\s+(evidence|proof|support)",
            ),
            PhrasePattern::new(
                Unbalanced,
                r"(completely|totally|entirely)\s+(wrong|incorrect|false|untrue)",
            ),
            // Political framing
            PhrasePattern::new(
                Political,
                r"(left-wing|right-wing|liberal|conservative|progressive|reactionary)",
            ),
            PhrasePattern::new(
                Political,
                r"(radical|extremist|fringe|mainstream)\s+(view|position|stance)",
            ),
            PhrasePattern::new(Political, r"(propaganda|agenda|ideology|doctrine)"),
        ]
    })
}

/// Up to `CONTEXT_CHARS` characters either side of `start..end`, clipped to
/// the text and trimmed of surrounding whitespace.
fn context_window(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    text[from..to].trim().to_string()
}

/// Scan a text for biased phrasing.
pub fn detect_biased_phrases(text: &str) -> BiasAssessment {
    if text.is_empty() {
        return BiasAssessment::default();
    }

    let mut bias_count = 0;
    let mut biased_phrases = Vec::new();

    for entry in get_patterns() {
        for m in entry.pattern.find_iter(text) {
            bias_count += 1;
            if biased_phrases.len() < MAX_REPORTED_PHRASES {
                biased_phrases.push(PhraseMatch {
                    category: entry.category,
                    phrase: m.as_str().to_string(),
                    context: context_window(text, m.start(), m.end()),
                });
            }
        }
    }

    let units = (text.chars().count() as f64 / 1000.0).max(1.0);

    BiasAssessment {
        bias_score: bias_count as f64 / units,
        bias_count,
        biased_phrases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn categories(result: &BiasAssessment) -> HashSet<BiasCategory> {
        result.biased_phrases.iter().map(|p| p.category).collect()
    }

    #[test]
    fn test_loaded_language() {
        let result = detect_biased_phrases(
            "This is clearly the best solution. Obviously, we should proceed. Undoubtedly, this will work.",
        );
        assert!(result.bias_count >= 3, "found {}", result.bias_count);
        assert!(categories(&result).contains(&BiasCategory::LoadedLanguage));
    }

    #[test]
    fn test_opinionated() {
        let result = detect_biased_phrases(
            "We believe this is important. Many experts think this is correct. It is widely believed that this works.",
        );
        assert_eq!(result.bias_count, 3);
        assert_eq!(
            categories(&result),
            HashSet::from([BiasCategory::Opinionated])
        );
    }

    #[test]
    fn test_unbalanced() {
        let result = detect_biased_phrases(
            "This is completely wrong without any evidence. It is totally incorrect.",
        );
        assert_eq!(result.bias_count, 3);
        assert!(categories(&result).contains(&BiasCategory::Unbalanced));
    }

    #[test]
    fn test_political() {
        let result = detect_biased_phrases(
            "This is a left-wing view. The right-wing position is different. This is propaganda.",
        );
        assert_eq!(result.bias_count, 3);
        assert_eq!(categories(&result), HashSet::from([BiasCategory::Political]));
    }

    #[test]
    fn test_mixed_categories() {
        let result = detect_biased_phrases(
            "We clearly believe this is the best solution. Obviously, it is widely accepted. \
             This is left-wing propaganda without any evidence.",
        );
        assert!(result.bias_count >= 5);
        assert_eq!(categories(&result).len(), 4);
    }

    #[test]
    fn test_neutral_text() {
        for text in [
            "The study found that temperature increased by 1.5 degrees. Research indicates this trend continues.",
            "Climate change refers to long-term shifts in global temperatures and weather patterns. \
             According to the IPCC, human activities are the primary driver of recent climate change.",
        ] {
            let result = detect_biased_phrases(text);
            assert_eq!(result.bias_count, 0, "unexpected matches in {text:?}");
            assert_eq!(result.bias_score, 0.0);
        }
    }

    #[test]
    fn test_empty_text() {
        let result = detect_biased_phrases("");
        assert_eq!(result.bias_count, 0);
        assert_eq!(result.bias_score, 0.0);
        assert!(result.biased_phrases.is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        // "agendas" and "nonliberal" only contain pattern words
        let result = detect_biased_phrases("The meeting agendas were unclear and nonliberal.");
        assert_eq!(result.bias_count, 0);
    }

    #[test]
    fn test_score_is_per_thousand_chars() {
        let short = detect_biased_phrases("clearly");
        assert_eq!(short.bias_score, 1.0);

        let long_text = format!("clearly {}", "x".repeat(1992));
        let long = detect_biased_phrases(&long_text);
        assert_eq!(long.bias_count, 1);
        assert!((long.bias_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_phrase_list_capped_in_category_order() {
        let text = format!("{} propaganda", "obviously ".repeat(12));
        let result = detect_biased_phrases(&text);
        assert_eq!(result.bias_count, 13);
        assert_eq!(result.biased_phrases.len(), 10);
        assert!(result
            .biased_phrases
            .iter()
            .all(|p| p.category == BiasCategory::LoadedLanguage));
    }

    #[test]
    fn test_context_window_is_clipped() {
        let text = format!("{} clearly {}", "a".repeat(80), "b".repeat(80));
        let result = detect_biased_phrases(&text);
        let ctx = &result.biased_phrases[0].context;
        assert!(ctx.contains("clearly"));
        assert!(ctx.chars().count() <= 50 + "clearly".len() + 50);

        let edge = detect_biased_phrases("Clearly.");
        assert_eq!(edge.biased_phrases[0].context, "Clearly.");
        assert_eq!(edge.biased_phrases[0].phrase, "Clearly");
    }

    #[test]
    fn test_context_respects_multibyte_characters() {
        let text = format!("{} clearly {}", "é".repeat(60), "ü".repeat(60));
        let result = detect_biased_phrases(&text);
        let ctx = &result.biased_phrases[0].context;
        assert_eq!(ctx.chars().filter(|c| *c == 'é').count(), 49);
        assert_eq!(ctx.chars().filter(|c| *c == 'ü').count(), 49);
    }

    #[test]
    fn test_score_never_negative() {
        for text in ["", "a", "clearly clearly", &"word ".repeat(500)] {
            let result = detect_biased_phrases(text);
            assert!(result.bias_score >= 0.0 && result.bias_score.is_finite());
        }
    }
}
