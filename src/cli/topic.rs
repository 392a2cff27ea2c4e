//! Topic and batch commands - fetch live revision histories and report

use super::emit;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use wikibias::config::Settings;
use wikibias::reporters::{self, OutputFormat};
use wikibias::topic::{RunReport, TopicAnalyzer};
use wikibias::wiki::WikiClient;

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap()
        .progress_chars("█▓▒░  ")
}

/// Analyze one topic
pub fn run_topic(
    settings: &Settings,
    topic: &str,
    pages: Option<usize>,
    revisions: Option<usize>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let client = WikiClient::new(&settings.api);
    info!("Querying {}", client.endpoint());
    let mut analyzer = TopicAnalyzer::new(client, &settings.analysis);
    if let Some(pages) = pages {
        analyzer = analyzer.with_pages_per_topic(pages);
    }
    if let Some(revisions) = revisions {
        analyzer = analyzer.with_revisions_per_page(revisions);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Analyzing '{topic}'..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    let summary = analyzer.analyze_topic(topic);
    spinner.finish_and_clear();

    let report = match summary? {
        Some(summary) => RunReport::new(vec![summary]),
        None => {
            eprintln!("{} No pages found for '{}'", style("!").yellow(), topic);
            RunReport::new(Vec::new())
        }
    };

    emit(&reporters::report_with_format(&report, format)?, format, output)
}

/// Analyze several topics; an empty list means the configured defaults
pub fn run_batch(
    settings: &Settings,
    topics: Vec<String>,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let topics = if topics.is_empty() {
        settings.default_topics()
    } else {
        topics
    };
    if topics.is_empty() {
        anyhow::bail!("No topics to analyze. Pass topics or set [analysis] topics in wikibias.toml");
    }
    info!("Analyzing {} topics", topics.len());

    let client = WikiClient::new(&settings.api);
    info!("Querying {}", client.endpoint());
    let analyzer = TopicAnalyzer::new(client, &settings.analysis);
    let bar = ProgressBar::new(topics.len() as u64);
    bar.set_style(bar_style());

    let report = analyzer.analyze_topics_with(&topics, |i, topic| {
        bar.set_position(i as u64);
        bar.set_message(topic.to_string());
    });
    bar.finish_and_clear();

    emit(&reporters::report_with_format(&report, format)?, format, output)
}
