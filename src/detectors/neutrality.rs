//! Neutral point of view (NPOV) scoring
//!
//! Four signals are checked, each producing at most one violation:
//!
//! | Signal                      | Violation                   | Severity |
//! |-----------------------------|-----------------------------|----------|
//! | Strong claims, few rebuttals| `missing_counterpoints`     | medium   |
//! | One-sided argument phrasing | `one_sided_argument`        | medium   |
//! | Certainty adverbs           | `excessive_loaded_language` | low      |
//! | First-person opinion        | `first_person_pov`          | high     |
//!
//! Score = max(0, 1 - sum of severity weights). Compliance is graded from the
//! score with fixed boundaries (see [`Compliance::from_score`]).

use crate::models::{Compliance, NeutralityAssessment, NeutralityViolation, Severity, ViolationKind};
use regex::Regex;
use std::sync::OnceLock;

/// Strong claims needed before missing counterpoints are flagged
const MIN_STRONG_CLAIMS: usize = 3;

/// Counterpoints required per strong claim
const COUNTERPOINT_RATIO: f64 = 0.3;

/// Loaded terms tolerated in a text of any length
const MAX_LOADED_TERMS: usize = 3;

/// Loaded terms tolerated in a short text
const MAX_LOADED_TERMS_SHORT: usize = 1;

/// Texts shorter than this (in characters) use the stricter loaded-term limit
const SHORT_TEXT_CHARS: usize = 200;

static PATTERNS: OnceLock<NeutralityPatterns> = OnceLock::new();

struct NeutralityPatterns {
    strong_claims: Regex,
    counterpoints: Regex,
    one_sided: Vec<Regex>,
    loaded_terms: Regex,
    first_person: Regex,
}

fn get_patterns() -> &'static NeutralityPatterns {
    PATTERNS.get_or_init(|| NeutralityPatterns {
        strong_claims: Regex::new(r"(?i)\b(proves|demonstrates|shows|indicates)\s+\w+").unwrap(),
        counterpoints: Regex::new(
            r"(?i)\b(however|although|though|while|some|critics|opponents|but|alternatively|conversely|on\s+the\s+other\s+hand|nevertheless|yet)\b",
        )
        .unwrap(),
        one_sided: vec![
            Regex::new(
                r"(?i)\b(everyone|everybody|all\s+experts|all\s+scientists|all\s+researchers)\s+(agrees?|accepts?|knows?)\b",
            )
            .unwrap(),
            Regex::new(r"(?i)\b(universally|widely|generally)\s+accepted\s+(without|with\s+no)\s+\w+")
                .unwrap(),
            Regex::new(r"(?i)\b(no|little|minimal)\s+(evidence|support)\s+(for|against)\b").unwrap(),
        ],
        loaded_terms: Regex::new(r"(?i)\b(clearly|obviously|undoubtedly|certainly|definitely)\b")
            .unwrap(),
        first_person: Regex::new(r"(?i)\b(we|our|us|I)\s+(believe|think|feel|argue|claim)\b")
            .unwrap(),
    })
}

fn violation(kind: ViolationKind, description: String, severity: Severity) -> NeutralityViolation {
    NeutralityViolation {
        kind,
        description,
        severity,
    }
}

/// Score a text's compliance with the neutral point of view policy.
pub fn analyze_neutrality(text: &str) -> NeutralityAssessment {
    if text.is_empty() {
        return NeutralityAssessment::default();
    }

    let patterns = get_patterns();
    let mut violations = Vec::new();

    // Strong claims without balancing perspectives
    let strong_claims = patterns.strong_claims.find_iter(text).count();
    let counterpoints = patterns.counterpoints.find_iter(text).count();
    if strong_claims >= MIN_STRONG_CLAIMS {
        if counterpoints == 0 {
            violations.push(violation(
                ViolationKind::MissingCounterpoints,
                format!("{strong_claims} strong claims with no counterpoints"),
                Severity::Medium,
            ));
        } else if (counterpoints as f64) < strong_claims as f64 * COUNTERPOINT_RATIO {
            violations.push(violation(
                ViolationKind::MissingCounterpoints,
                format!("{strong_claims} strong claims with only {counterpoints} counterpoints"),
                Severity::Medium,
            ));
        }
    }

    if let Some(m) = patterns.one_sided.iter().find_map(|p| p.find(text)) {
        violations.push(violation(
            ViolationKind::OneSidedArgument,
            format!("One-sided argument: \"{}\"", m.as_str()),
            Severity::Medium,
        ));
    }

    let loaded_terms = patterns.loaded_terms.find_iter(text).count();
    let is_short = text.chars().count() < SHORT_TEXT_CHARS;
    if loaded_terms > MAX_LOADED_TERMS || (loaded_terms > MAX_LOADED_TERMS_SHORT && is_short) {
        violations.push(violation(
            ViolationKind::ExcessiveLoadedLanguage,
            format!("{loaded_terms} loaded terms (clearly, obviously, ...)"),
            Severity::Low,
        ));
    }

    let pov = patterns.first_person.find_iter(text).count();
    if pov > 0 {
        violations.push(violation(
            ViolationKind::FirstPersonPov,
            format!("{pov} first-person opinion statements"),
            Severity::High,
        ));
    }

    let penalty: f64 = violations.iter().map(|v| v.severity.neutrality_weight()).sum();
    let neutrality_score = (1.0 - penalty).max(0.0);

    NeutralityAssessment {
        neutrality_score,
        violation_count: violations.len(),
        compliance: Compliance::from_score(neutrality_score),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(result: &NeutralityAssessment) -> Vec<ViolationKind> {
        result.violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_balanced_text() {
        let result = analyze_neutrality(
            "Climate change is a significant issue. However, some scientists argue that natural \
             variability also plays a role. While most research supports human influence, critics \
             point to historical climate variations.",
        );
        assert_eq!(result.violation_count, 0);
        assert_eq!(result.neutrality_score, 1.0);
        assert_eq!(result.compliance, Compliance::Good);
    }

    #[test]
    fn test_missing_counterpoints() {
        let result = analyze_neutrality(
            "This proves that climate change is real. The evidence demonstrates human influence. \
             Studies show that temperatures are rising. Research indicates this trend will continue.",
        );
        assert_eq!(kinds(&result), vec![ViolationKind::MissingCounterpoints]);
        assert_eq!(result.violations[0].severity, Severity::Medium);
        assert_eq!(result.neutrality_score, 0.85);
        assert_eq!(result.compliance, Compliance::Good);
    }

    #[test]
    fn test_too_few_counterpoints() {
        // Four claims need at least two counterpoints (4 * 0.3 = 1.2)
        let result = analyze_neutrality(
            "Data proves warming. Data shows melting. Data indicates drought. Data demonstrates \
             flooding. However, this is debated.",
        );
        assert_eq!(kinds(&result), vec![ViolationKind::MissingCounterpoints]);

        let balanced = analyze_neutrality(
            "Data proves warming. Data shows melting. Data indicates drought. Data demonstrates \
             flooding. However, this is debated, but only in part.",
        );
        assert!(balanced.violations.is_empty());
    }

    #[test]
    fn test_excessive_loaded_language() {
        let result = analyze_neutrality(
            "This is clearly the best approach. Obviously, we should proceed. Undoubtedly, this \
             will work. Certainly, this is correct. Definitely, this is the solution.",
        );
        assert_eq!(kinds(&result), vec![ViolationKind::ExcessiveLoadedLanguage]);
        assert!((result.neutrality_score - 0.9).abs() < 1e-9);
        assert_eq!(result.compliance, Compliance::Good);
    }

    #[test]
    fn test_short_text_loaded_threshold() {
        let short = analyze_neutrality("Clearly and obviously so.");
        assert_eq!(kinds(&short), vec![ViolationKind::ExcessiveLoadedLanguage]);

        let long = format!("Clearly and obviously so. {}", "Plain words here. ".repeat(20));
        assert!(analyze_neutrality(&long).violations.is_empty());
    }

    #[test]
    fn test_first_person_pov() {
        let result = analyze_neutrality(
            "We believe this is important. Our research shows this is correct. I think this is \
             the best approach.",
        );
        let pov: Vec<_> = result
            .violations
            .iter()
            .filter(|v| v.kind == ViolationKind::FirstPersonPov)
            .collect();
        assert_eq!(pov.len(), 1);
        assert_eq!(pov[0].severity, Severity::High);
        assert!(result.neutrality_score <= 0.75);
        assert_eq!(result.compliance, Compliance::Moderate);
    }

    #[test]
    fn test_one_sided_argument_reported_once() {
        let result = analyze_neutrality(
            "Everyone agrees on this. There is no evidence for the alternative and little support \
             against it.",
        );
        assert_eq!(kinds(&result), vec![ViolationKind::OneSidedArgument]);
        assert_eq!(result.violations[0].severity, Severity::Medium);
    }

    #[test]
    fn test_multiple_violations() {
        let result = analyze_neutrality(
            "We clearly believe this proves everything. Obviously, this demonstrates our point. \
             Undoubtedly, we are correct. This is definitely the best solution without any \
             evidence to the contrary.",
        );
        assert!(result.violation_count >= 1);
        assert_eq!(result.compliance, Compliance::Good);
    }

    #[test]
    fn test_all_violations_stack() {
        let result = analyze_neutrality(
            "We think it proves this, shows that, indicates more and demonstrates all. \
             Everyone agrees. Clearly, obviously, certainly, definitely.",
        );
        assert_eq!(result.violation_count, 4);
        assert!((result.neutrality_score - 0.35).abs() < 1e-9);
        assert_eq!(result.compliance, Compliance::Poor);
    }

    #[test]
    fn test_empty_text() {
        let result = analyze_neutrality("");
        assert_eq!(result.neutrality_score, 1.0);
        assert!(result.violations.is_empty());
        assert_eq!(result.compliance, Compliance::Good);
    }

    #[test]
    fn test_wikipedia_style_neutral() {
        let result = analyze_neutrality(
            "According to the IPCC, climate change is primarily caused by human activities. \
             However, some researchers note that natural factors also contribute. The scientific \
             consensus supports the view that human influence is dominant, though debate \
             continues about the relative contributions of different factors.",
        );
        assert_eq!(result.violation_count, 0);
        assert_eq!(result.compliance, Compliance::Good);
    }

    #[test]
    fn test_score_bounds() {
        for text in ["", "x", "We think. We feel. We argue.", &"clearly ".repeat(50)] {
            let result = analyze_neutrality(text);
            assert!((0.0..=1.0).contains(&result.neutrality_score));
            assert_eq!(result.compliance, Compliance::from_score(result.neutrality_score));
        }
    }
}
