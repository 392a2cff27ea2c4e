//! Topic-level orchestration
//!
//! ```text
//! topic ──search──▶ titles ──fetch──▶ revisions ──▶ series ──▶ indicators
//!                                                        │
//!                                   PageResult ◀─────────┘
//!                                        │
//!                                  TopicSummary ──▶ RunReport
//! ```
//!
//! Revisions come from a [`RevisionSource`], so the orchestrator runs the
//! same against the live wiki client and an in-memory fixture.

mod analyzer;

pub use analyzer::TopicAnalyzer;

use crate::models::{BiasIndicator, Severity};
use crate::revision::RevisionRecord;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const PAGE_URL_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Where page titles and revision histories come from
pub trait RevisionSource {
    /// Titles of up to `limit` pages matching `query`
    fn search_pages(&self, query: &str, limit: usize) -> Result<Vec<String>>;

    /// Up to `limit` revisions of the page titled `title`
    fn fetch_revisions(&self, title: &str, limit: usize) -> Result<PageRevisions>;
}

impl<S: RevisionSource + ?Sized> RevisionSource for &S {
    fn search_pages(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        (**self).search_pages(query, limit)
    }

    fn fetch_revisions(&self, title: &str, limit: usize) -> Result<PageRevisions> {
        (**self).fetch_revisions(title, limit)
    }
}

/// A page's revision history as returned by a [`RevisionSource`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRevisions {
    pub pageid: Option<u64>,
    pub revisions: Vec<RevisionRecord>,
}

/// Counts of the series-analysis collections for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysisCounts {
    pub size_changes_count: usize,
    pub citation_changes_count: usize,
    pub amplification_count: usize,
}

/// Analysis of one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub title: String,
    pub pageid: Option<u64>,
    pub page_url: String,
    pub total_edits: usize,
    pub bot_edits: usize,
    pub bot_ratio: f64,
    pub bias_indicators: Vec<BiasIndicator>,
    pub content_analysis: ContentAnalysisCounts,
}

/// Roll-up of every analyzed page for one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub topic: String,
    /// Pages that produced a result
    pub pages_analyzed: usize,
    pub total_edits: usize,
    pub total_bot_edits: usize,
    pub overall_bot_ratio: f64,
    pub bias_severity: Severity,
    /// Page indicators concatenated in page order
    pub bias_indicators: Vec<BiasIndicator>,
    pub page_results: Vec<PageResult>,
}

impl TopicSummary {
    /// Roll up page results. Totals are sums; severity follows the indicator
    /// count (more than 3 is high, more than 1 is medium).
    pub fn from_pages(topic: impl Into<String>, page_results: Vec<PageResult>) -> Self {
        let total_edits: usize = page_results.iter().map(|p| p.total_edits).sum();
        let total_bot_edits: usize = page_results.iter().map(|p| p.bot_edits).sum();
        let bias_indicators: Vec<BiasIndicator> = page_results
            .iter()
            .flat_map(|p| p.bias_indicators.iter().cloned())
            .collect();

        let overall_bot_ratio = if total_edits > 0 {
            total_bot_edits as f64 / total_edits as f64
        } else {
            0.0
        };

        let bias_severity = match bias_indicators.len() {
            n if n > 3 => Severity::High,
            n if n > 1 => Severity::Medium,
            _ => Severity::Low,
        };

        Self {
            topic: topic.into(),
            pages_analyzed: page_results.len(),
            total_edits,
            total_bot_edits,
            overall_bot_ratio,
            bias_severity,
            bias_indicators,
            page_results,
        }
    }
}

/// Results of one multi-topic run, as written by the JSON reporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub topics_analyzed: usize,
    pub analyses: Vec<TopicSummary>,
}

impl RunReport {
    pub fn new(analyses: Vec<TopicSummary>) -> Self {
        Self {
            generated_at: Utc::now(),
            topics_analyzed: analyses.len(),
            analyses,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.analyses.iter().map(|a| a.pages_analyzed).sum()
    }

    pub fn total_edits(&self) -> usize {
        self.analyses.iter().map(|a| a.total_edits).sum()
    }

    pub fn total_bot_edits(&self) -> usize {
        self.analyses.iter().map(|a| a.total_bot_edits).sum()
    }

    /// Bot share across all topics, 0 when nothing was edited
    pub fn overall_bot_ratio(&self) -> f64 {
        match self.total_edits() {
            0 => 0.0,
            edits => self.total_bot_edits() as f64 / edits as f64,
        }
    }
}

/// Canonical article URL for a page title
pub fn page_url(title: &str) -> String {
    format!("{PAGE_URL_BASE}{}", title.replace(' ', "_"))
}
