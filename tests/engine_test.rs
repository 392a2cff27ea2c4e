//! End-to-end tests for the scoring engine
//!
//! Runs the library against a saved revision history, both directly and
//! through the topic orchestrator with an in-memory revision source.

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;
use wikibias::config::AnalysisSettings;
use wikibias::models::{Compliance, IndicatorKind, Severity};
use wikibias::reporters::{self, OutputFormat};
use wikibias::topic::{PageRevisions, RevisionSource, TopicAnalyzer};
use wikibias::{
    aggregate_bias_indicators, analyze_neutrality, analyze_revision_series, count_citations,
    detect_biased_phrases, parse_revisions, RevisionRecord,
};

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_history() -> Vec<RevisionRecord> {
    let raw = std::fs::read_to_string(fixtures_path().join("vaccination_history.json"))
        .expect("read fixture");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("parse fixture");
    parse_revisions(&value).expect("revision list")
}

struct FixtureSource {
    history: Vec<RevisionRecord>,
}

impl RevisionSource for FixtureSource {
    fn search_pages(&self, query: &str, _limit: usize) -> Result<Vec<String>> {
        match query {
            "vaccination" => Ok(vec!["Vaccination".into(), "Vaccine hesitancy".into()]),
            _ => Ok(Vec::new()),
        }
    }

    fn fetch_revisions(&self, title: &str, limit: usize) -> Result<PageRevisions> {
        match title {
            "Vaccination" => Ok(PageRevisions {
                pageid: Some(32693),
                revisions: self.history.iter().take(limit).cloned().collect(),
            }),
            _ => bail!("HTTP 429 Too Many Requests"),
        }
    }
}

#[test]
fn test_fixture_series() {
    let history = load_history();
    assert_eq!(history.len(), 5);
    // Legacy "*" content key and non-list tags both resolve
    assert!(history[4].content().contains("We believe"));
    assert!(history[2].tags().is_empty());

    let analysis = analyze_revision_series(&history);
    assert_eq!(analysis.bot_revisions, 2);
    assert_eq!(analysis.human_revisions, 3);
    assert_eq!(analysis.deltas.len(), 4);
    let citation_deltas: Vec<i64> = analysis.deltas.iter().map(|d| d.citation_delta).collect();
    assert_eq!(citation_deltas, vec![3, 0, 3, 0]);
    // Only the first revision grows past 1.5x
    assert_eq!(analysis.amplifications.len(), 1);
    assert_eq!(analysis.amplifications[0].revid, Some(1001));
}

#[test]
fn test_fixture_indicators() {
    let analysis = analyze_revision_series(&load_history());
    let indicators = aggregate_bias_indicators(&analysis, "Vaccination");
    let graded: Vec<(IndicatorKind, Severity)> =
        indicators.iter().map(|i| (i.kind, i.severity)).collect();
    assert_eq!(
        graded,
        vec![
            (IndicatorKind::HighBotRatio, Severity::Low),
            (IndicatorKind::CitationBias, Severity::Medium),
            (IndicatorKind::BiasedLanguageCorrection, Severity::Medium),
            (IndicatorKind::PerceptionBiasRisk, Severity::Low),
        ]
    );
    assert_eq!(
        indicators[0].description,
        "Significant bot edit ratio (40.0%) may indicate automated bias"
    );
    assert_eq!(
        indicators[1].description,
        "Bots and humans show different citation patterns (bot: 3.0, human: 0.0)"
    );
}

#[test]
fn test_text_fixture_scores() {
    let text = std::fs::read_to_string(fixtures_path().join("opinion.txt")).expect("read fixture");
    assert_eq!(count_citations(&text), 1);

    let bias = detect_biased_phrases(&text);
    assert_eq!(bias.bias_count, 3);
    assert!((bias.bias_score - 3.0).abs() < 1e-9);

    let neutrality = analyze_neutrality(&text);
    assert_eq!(neutrality.violation_count, 3);
    assert!((neutrality.neutrality_score - 0.5).abs() < 1e-9);
    assert_eq!(neutrality.compliance, Compliance::Poor);
}

#[test]
fn test_topic_end_to_end() {
    let analyzer = TopicAnalyzer::new(
        FixtureSource {
            history: load_history(),
        },
        &AnalysisSettings::default(),
    )
    .with_pause(Duration::ZERO);

    let summary = analyzer
        .analyze_topic("vaccination")
        .expect("analyze")
        .expect("summary");
    // The second page fails to fetch and is skipped
    assert_eq!(summary.pages_analyzed, 1);
    assert_eq!(summary.total_edits, 5);
    assert_eq!(summary.total_bot_edits, 2);
    assert!((summary.overall_bot_ratio - 0.4).abs() < 1e-9);
    assert_eq!(summary.bias_indicators.len(), 4);
    assert_eq!(summary.bias_severity, Severity::High);

    let page = &summary.page_results[0];
    assert_eq!(page.pageid, Some(32693));
    assert_eq!(page.page_url, "https://en.wikipedia.org/wiki/Vaccination");
    assert_eq!(page.content_analysis.size_changes_count, 4);
    assert_eq!(page.content_analysis.amplification_count, 1);

    assert!(analyzer.analyze_topic("astronomy").expect("analyze").is_none());
}

#[test]
fn test_run_report_renders() {
    let analyzer = TopicAnalyzer::new(
        FixtureSource {
            history: load_history(),
        },
        &AnalysisSettings::default(),
    )
    .with_pause(Duration::ZERO);

    let report = analyzer.analyze_topics(&["vaccination", "astronomy"]);
    assert_eq!(report.topics_analyzed, 1);

    let json = reporters::report_with_format(&report, OutputFormat::Json).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed["analyses"][0]["bias_severity"], "high");
    assert_eq!(
        parsed["analyses"][0]["bias_indicators"][2]["type"],
        "biased_language_correction"
    );

    let text = reporters::report_with_format(&report, OutputFormat::Text).expect("text");
    assert!(text.contains("1 topics show high automation bias"));
    assert!(text.contains("https://en.wikipedia.org/wiki/Vaccination"));
}
