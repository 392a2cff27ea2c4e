//! Series command - analyze a saved revision list offline

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;
use wikibias::history::SeriesAnalysis;
use wikibias::models::{BiasIndicator, Severity};
use wikibias::revision::parse_revisions_str;
use wikibias::{aggregate_bias_indicators, analyze_revision_series};

#[derive(Debug, Serialize)]
struct SeriesReport {
    title: String,
    total_edits: usize,
    bot_edits: usize,
    bot_ratio: f64,
    bias_indicators: Vec<BiasIndicator>,
    analysis: SeriesAnalysis,
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

fn analyze(json: &str, title: &str) -> Result<SeriesReport> {
    let revisions = parse_revisions_str(json)?;
    let analysis = analyze_revision_series(&revisions);
    let bias_indicators = aggregate_bias_indicators(&analysis, title);
    Ok(SeriesReport {
        title: title.to_string(),
        total_edits: analysis.total_revisions(),
        bot_edits: analysis.bot_revisions,
        bot_ratio: analysis.bot_ratio(),
        bias_indicators,
        analysis,
    })
}

fn render_text(report: &SeriesReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", style(&report.title).bold()));
    out.push_str(&format!(
        "  Edits: {}  Bot edits: {}  Bot ratio: {:.1}%\n",
        report.total_edits,
        report.bot_edits,
        report.bot_ratio * 100.0
    ));
    out.push_str(&format!(
        "  Deltas: {}  Amplifications: {}\n\n",
        report.analysis.deltas.len(),
        report.analysis.amplifications.len()
    ));

    if report.bias_indicators.is_empty() {
        out.push_str(&format!("{} No bias indicators\n", style("✓").green()));
        return out;
    }

    out.push_str(&format!(
        "{} ({})\n",
        style("Bias indicators").bold(),
        report.bias_indicators.len()
    ));
    for indicator in &report.bias_indicators {
        let tag = match indicator.severity {
            Severity::High => style("[H]").red(),
            Severity::Medium => style("[M]").yellow(),
            Severity::Low => style("[L]").blue(),
        };
        out.push_str(&format!(
            "  {} {} {}\n",
            tag,
            indicator.description,
            style(format!("({})", indicator.kind)).dim()
        ));
    }
    out
}

pub fn run(file: &Path, title: Option<&str>, format: &str) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let title = title.map_or_else(|| title_from_path(file), str::to_string);
    let report = analyze(&json, &title)
        .with_context(|| format!("Invalid revision list in {}", file.display()))?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render_text(&report)),
    }
    Ok(())
}
