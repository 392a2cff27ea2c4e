//! Text command - score a single text offline

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;
use wikibias::models::{BiasAssessment, Compliance, NeutralityAssessment};
use wikibias::{analyze_neutrality, count_citations, detect_biased_phrases};

#[derive(Debug, Serialize)]
struct TextReport {
    characters: usize,
    citations: usize,
    bias: BiasAssessment,
    neutrality: NeutralityAssessment,
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
    }
}

fn assess(text: &str) -> TextReport {
    TextReport {
        characters: text.chars().count(),
        citations: count_citations(text),
        bias: detect_biased_phrases(text),
        neutrality: analyze_neutrality(text),
    }
}

fn render_text(report: &TextReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{} ({} chars, {} citations)\n\n",
        style("Text assessment").bold(),
        report.characters,
        report.citations
    ));

    out.push_str(&format!(
        "{} {:.2} per 1000 chars ({} matches)\n",
        style("Bias:").bold(),
        report.bias.bias_score,
        report.bias.bias_count
    ));
    for phrase in &report.bias.biased_phrases {
        out.push_str(&format!(
            "  {} {} {}\n",
            style(format!("[{}]", phrase.category)).dim(),
            style(&phrase.phrase).yellow(),
            style(format!("...{}...", phrase.context)).dim()
        ));
    }

    let compliance = match report.neutrality.compliance {
        Compliance::Good => style(report.neutrality.compliance.to_string()).green(),
        Compliance::Moderate => style(report.neutrality.compliance.to_string()).yellow(),
        Compliance::Poor => style(report.neutrality.compliance.to_string()).red(),
    };
    out.push_str(&format!(
        "\n{} {:.2} ({})\n",
        style("Neutrality:").bold(),
        report.neutrality.neutrality_score,
        compliance
    ));
    for violation in &report.neutrality.violations {
        out.push_str(&format!(
            "  {} {} - {}\n",
            style(format!("[{}]", violation.severity)).dim(),
            violation.kind.as_str(),
            violation.description
        ));
    }
    out
}

pub fn run(file: Option<&Path>, format: &str) -> Result<()> {
    let text = read_input(file)?;
    let report = assess(&text);
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render_text(&report)),
    }
    Ok(())
}
