//! Text (terminal) reporter with colors and formatting

use crate::models::Severity;
use crate::topic::{RunReport, TopicSummary};
use anyhow::Result;

/// Indicators listed per topic
const TOP_INDICATORS: usize = 3;

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::High => "\x1b[91m",   // Light red
        Severity::Medium => "\x1b[33m", // Yellow
        Severity::Low => "\x1b[34m",    // Blue
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Render report as formatted terminal output
pub fn render(report: &RunReport) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}Automation Bias Analysis{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "{DIM}Generated {}{RESET}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str(&format!("{BOLD}OVERALL STATISTICS{RESET}\n"));
    out.push_str(&format!("  Topics analyzed: {}\n", report.topics_analyzed));
    out.push_str(&format!("  Total pages: {}\n", report.total_pages()));
    out.push_str(&format!("  Total edits: {}\n", report.total_edits()));
    out.push_str(&format!("  Bot edits: {}\n", report.total_bot_edits()));
    out.push_str(&format!(
        "  Overall bot ratio: {}\n\n",
        percent(report.overall_bot_ratio())
    ));

    if !report.analyses.is_empty() {
        out.push_str(&format!("{BOLD}TOPICS{RESET}\n"));
        for topic in &report.analyses {
            render_topic(&mut out, topic);
        }
    }

    out.push_str(&format!("{BOLD}KEY FINDINGS{RESET}\n"));
    let high: Vec<&TopicSummary> = report
        .analyses
        .iter()
        .filter(|a| a.bias_severity == Severity::High)
        .collect();
    if high.is_empty() {
        out.push_str(&format!("  {DIM}No topics show high automation bias{RESET}\n"));
    } else {
        out.push_str(&format!(
            "  {} topics show high automation bias\n",
            high.len()
        ));
        for topic in high {
            out.push_str(&format!(
                "    - {}: {} bias indicators\n",
                topic.topic,
                topic.bias_indicators.len()
            ));
        }
    }

    Ok(out)
}

fn render_topic(out: &mut String, topic: &TopicSummary) {
    let sev_c = severity_color(&topic.bias_severity);
    out.push_str(&format!("\n  {BOLD}{}{RESET}\n", topic.topic));
    out.push_str(&format!(
        "    Pages: {}  Edits: {}  Bot ratio: {}\n",
        topic.pages_analyzed,
        topic.total_edits,
        percent(topic.overall_bot_ratio)
    ));
    out.push_str(&format!(
        "    Bias severity: {sev_c}{}{RESET}  Indicators: {}\n",
        topic.bias_severity,
        topic.bias_indicators.len()
    ));

    if !topic.bias_indicators.is_empty() {
        out.push_str("    Key bias patterns:\n");
        for indicator in topic.bias_indicators.iter().take(TOP_INDICATORS) {
            let c = severity_color(&indicator.severity);
            out.push_str(&format!(
                "      {c}•{RESET} {} {DIM}[{}]{RESET}\n",
                indicator.description, indicator.kind
            ));
        }
    }

    if !topic.page_results.is_empty() {
        out.push_str("    Pages analyzed:\n");
        for page in &topic.page_results {
            out.push_str(&format!(
                "      • {}: {DIM}{}{RESET}\n",
                page.title, page.page_url
            ));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_text_overall_statistics() {
        let out = render(&test_report()).expect("render text");
        assert!(out.contains("Topics analyzed: 2"));
        assert!(out.contains("Total pages: 3"));
        assert!(out.contains("Total edits: 90"));
        assert!(out.contains("Bot edits: 36"));
        assert!(out.contains("Overall bot ratio: 40.0%"));
    }

    #[test]
    fn test_text_lists_top_three_indicators() {
        let out = render(&test_report()).expect("render text");
        assert!(out.contains("may indicate automated bias"));
        assert!(out.contains("different citation patterns"));
        assert!(out.contains("shape reader perception"));
        // Fourth indicator is not listed
        assert!(!out.contains("smaller edits"));
    }

    #[test]
    fn test_text_page_links_and_findings() {
        let out = render(&test_report()).expect("render text");
        assert!(out.contains("https://en.wikipedia.org/wiki/Gun_politics_in_the_United_States"));
        assert!(out.contains("1 topics show high automation bias"));
        assert!(out.contains("- gun control: 4 bias indicators"));
        assert!(!out.contains("- renewable energy"));
    }

    #[test]
    fn test_text_empty_report() {
        let out = render(&RunReport::new(Vec::new())).expect("render text");
        assert!(out.contains("Overall bot ratio: 0.0%"));
        assert!(out.contains("No topics show high automation bias"));
    }
}
