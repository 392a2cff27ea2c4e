//! Drives series analysis and aggregation over the pages of a topic

use super::{page_url, ContentAnalysisCounts, PageResult, PageRevisions, RevisionSource, RunReport, TopicSummary};
use crate::config::AnalysisSettings;
use crate::history::analyze_revision_series;
use crate::scoring::aggregate_bias_indicators;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct TopicAnalyzer<S: RevisionSource> {
    source: S,
    pages_per_topic: usize,
    revisions_per_page: usize,
    /// Pause between page fetches
    pause: Duration,
}

impl<S: RevisionSource> TopicAnalyzer<S> {
    pub fn new(source: S, settings: &AnalysisSettings) -> Self {
        Self {
            source,
            pages_per_topic: settings.pages_per_topic,
            revisions_per_page: settings.revisions_per_page,
            pause: Duration::from_millis(settings.rate_limit_ms),
        }
    }

    pub fn with_pages_per_topic(mut self, pages: usize) -> Self {
        self.pages_per_topic = pages;
        self
    }

    pub fn with_revisions_per_page(mut self, revisions: usize) -> Self {
        self.revisions_per_page = revisions;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Analyze one page's revisions. `None` when there is nothing to analyze.
    pub fn analyze_page(&self, title: &str, page: PageRevisions) -> Option<PageResult> {
        let PageRevisions { pageid, revisions } = page;
        if revisions.is_empty() {
            return None;
        }

        let analysis = analyze_revision_series(&revisions);
        let bias_indicators = aggregate_bias_indicators(&analysis, title);

        Some(PageResult {
            title: title.to_string(),
            pageid,
            page_url: page_url(title),
            total_edits: analysis.total_revisions(),
            bot_edits: analysis.bot_revisions,
            bot_ratio: analysis.bot_ratio(),
            bias_indicators,
            content_analysis: ContentAnalysisCounts {
                size_changes_count: analysis.deltas.len(),
                citation_changes_count: analysis.deltas.len(),
                amplification_count: analysis.amplifications.len(),
            },
        })
    }

    /// Search for pages about `topic` and analyze each one.
    ///
    /// Returns `Ok(None)` when the search finds nothing. A page that fails to
    /// fetch is skipped with a warning; only a failed search is an error.
    pub fn analyze_topic(&self, topic: &str) -> Result<Option<TopicSummary>> {
        let titles = self
            .source
            .search_pages(topic, self.pages_per_topic)
            .with_context(|| format!("Search for '{topic}' failed"))?;

        if titles.is_empty() {
            warn!("No pages found for topic '{}'", topic);
            return Ok(None);
        }
        info!("Analyzing {} pages for topic '{}'", titles.len(), topic);

        let mut page_results = Vec::new();
        for (i, title) in titles.iter().enumerate() {
            if i > 0 && !self.pause.is_zero() {
                std::thread::sleep(self.pause);
            }

            let page = match self.source.fetch_revisions(title, self.revisions_per_page) {
                Ok(page) => page,
                Err(e) => {
                    warn!("Skipping '{}': {:#}", title, e);
                    continue;
                }
            };

            match self.analyze_page(title, page) {
                Some(result) => {
                    debug!(
                        "{}: {} edits, {} bot edits, {} indicators",
                        title,
                        result.total_edits,
                        result.bot_edits,
                        result.bias_indicators.len()
                    );
                    page_results.push(result);
                }
                None => debug!("Skipping '{}': no revisions", title),
            }
        }

        Ok(Some(TopicSummary::from_pages(topic, page_results)))
    }

    /// Analyze several topics in turn. Topics that fail or find no pages are
    /// left out of the report.
    pub fn analyze_topics<T: AsRef<str>>(&self, topics: &[T]) -> RunReport {
        self.analyze_topics_with(topics, |_, _| {})
    }

    /// Like [`analyze_topics`](Self::analyze_topics), calling `on_topic` with
    /// the index and name of each topic before it is analyzed.
    pub fn analyze_topics_with<T, F>(&self, topics: &[T], mut on_topic: F) -> RunReport
    where
        T: AsRef<str>,
        F: FnMut(usize, &str),
    {
        let analyses = topics
            .iter()
            .enumerate()
            .filter_map(|(i, topic)| {
                let topic = topic.as_ref();
                on_topic(i, topic);
                match self.analyze_topic(topic) {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!("{:#}", e);
                        None
                    }
                }
            })
            .collect();
        RunReport::new(analyses)
    }
}
