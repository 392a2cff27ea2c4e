//! Bias-pattern aggregation
//!
//! Compares bot-authored and human-authored aggregates from a
//! [`SeriesAnalysis`] and emits severity-graded [`BiasIndicator`]s. Each
//! check is independent; indicators accumulate in a fixed order.

use super::ladder::SeverityLadder;
use crate::history::SeriesAnalysis;
use crate::models::{BiasIndicator, IndicatorKind, Severity};

/// Title keywords that mark an article as covering a controversy
pub const CONTROVERSIAL_KEYWORDS: &[&str] = &[
    "controversy",
    "debate",
    "dispute",
    "criticism",
    "opposition",
    "denial",
    "hesitancy",
];

/// Title keywords for topics where readers perceive bias most easily
pub const POLARIZING_KEYWORDS: &[&str] = &[
    "gun control",
    "abortion",
    "immigration",
    "vaccination",
    "climate change",
];

const HIGH_BOT_RATIO: SeverityLadder = SeverityLadder::new(
    0.3,
    &[(0.6, Severity::High), (0.4, Severity::Medium)],
    Severity::Low,
);

/// Absolute difference in mean citation delta
const CITATION_BIAS: SeverityLadder =
    SeverityLadder::new(1.0, &[(2.0, Severity::Medium)], Severity::Low);

/// Bot share of amplification events
const AMPLIFICATION_BIAS: SeverityLadder =
    SeverityLadder::new(0.5, &[(0.8, Severity::Medium)], Severity::Low);

/// Bot mean |size_delta| below this fraction of the human mean
const MAINTENANCE_SIZE_FRACTION: f64 = 0.5;
const MAINTENANCE_SEVERITY: Severity = Severity::Low;

/// Bot ratio on a controversial article
const CONTROVERSIAL_TOPIC: SeverityLadder = SeverityLadder::fixed(0.2, Severity::Medium);

/// Ratio between mean bias scores, in either direction
const BIASED_LANGUAGE: SeverityLadder =
    SeverityLadder::new(1.2, &[(1.5, Severity::Medium)], Severity::Low);

/// Human mean neutrality minus bot mean neutrality
const NEUTRALITY_BIAS: SeverityLadder =
    SeverityLadder::new(0.15, &[(0.25, Severity::High)], Severity::Medium);

/// Bot mean neutrality minus human mean neutrality
const NEUTRALITY_CORRECTION: SeverityLadder = SeverityLadder::fixed(0.15, Severity::Low);

/// Bot share of all neutrality violations
const NEUTRALITY_VIOLATIONS: SeverityLadder =
    SeverityLadder::new(0.6, &[(0.8, Severity::Medium)], Severity::Low);

/// Bot ratio on a polarizing article
const PERCEPTION_RISK: SeverityLadder = SeverityLadder::fixed(0.15, Severity::Low);

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// `num / den`, unbounded when only the denominator is zero
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else if num > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

fn title_mentions(title: &str, keywords: &[&str]) -> bool {
    let title = title.to_lowercase();
    keywords.iter().any(|k| title.contains(k))
}

/// Build the ordered list of bias indicators for one page.
pub fn aggregate_bias_indicators(analysis: &SeriesAnalysis, page_title: &str) -> Vec<BiasIndicator> {
    let mut indicators = Vec::new();
    let bot_ratio = analysis.bot_ratio();
    let (bot_deltas, human_deltas) = analysis.deltas_by_author();
    let (bot_revs, human_revs) = analysis.revisions_by_author();

    if let Some(severity) = HIGH_BOT_RATIO.grade(bot_ratio) {
        indicators.push(BiasIndicator::new(
            IndicatorKind::HighBotRatio,
            format!(
                "Significant bot edit ratio ({:.1}%) may indicate automated bias",
                bot_ratio * 100.0
            ),
            severity,
        ));
    }

    let bot_citations = mean(bot_deltas.iter().map(|d| d.citation_delta as f64));
    let human_citations = mean(human_deltas.iter().map(|d| d.citation_delta as f64));
    if let (Some(bot), Some(human)) = (bot_citations, human_citations) {
        if let Some(severity) = CITATION_BIAS.grade((bot - human).abs()) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::CitationBias,
                format!(
                    "Bots and humans show different citation patterns (bot: {bot:.1}, human: {human:.1})"
                ),
                severity,
            ));
        }
    }

    let total_amplifications = analysis.amplifications.len();
    if total_amplifications > 0 {
        let bot_amplifications = analysis.bot_amplifications();
        let share = bot_amplifications as f64 / total_amplifications as f64;
        if let Some(severity) = AMPLIFICATION_BIAS.grade(share) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::ContentAmplificationBias,
                format!(
                    "Bots responsible for {bot_amplifications}/{total_amplifications} content amplifications"
                ),
                severity,
            ));
        }
    }

    let bot_size = mean(bot_deltas.iter().map(|d| d.size_delta.unsigned_abs() as f64));
    let human_size = mean(human_deltas.iter().map(|d| d.size_delta.unsigned_abs() as f64));
    if let (Some(bot), Some(human)) = (bot_size, human_size) {
        if bot < human * MAINTENANCE_SIZE_FRACTION {
            indicators.push(BiasIndicator::new(
                IndicatorKind::MaintenanceBias,
                format!(
                    "Bots make smaller edits on average (bot: {bot:.0}, human: {human:.0} chars)"
                ),
                MAINTENANCE_SEVERITY,
            ));
        }
    }

    if title_mentions(page_title, CONTROVERSIAL_KEYWORDS) {
        if let Some(severity) = CONTROVERSIAL_TOPIC.grade(bot_ratio) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::ControversialTopicBias,
                format!(
                    "High bot activity ({:.1}%) on controversial topic",
                    bot_ratio * 100.0
                ),
                severity,
            ));
        }
    }

    let bot_bias = mean(bot_revs.iter().map(|r| r.bias_score));
    let human_bias = mean(human_revs.iter().map(|r| r.bias_score));
    if let (Some(bot), Some(human)) = (bot_bias, human_bias) {
        if let Some(severity) = BIASED_LANGUAGE.grade(ratio(bot, human)) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::BiasedLanguageBias,
                format!(
                    "Bot revisions carry more biased phrasing (bot: {bot:.2}, human: {human:.2} per 1000 chars)"
                ),
                severity,
            ));
        } else if let Some(severity) = BIASED_LANGUAGE.grade(ratio(human, bot)) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::BiasedLanguageCorrection,
                format!(
                    "Bot revisions carry less biased phrasing (bot: {bot:.2}, human: {human:.2} per 1000 chars)"
                ),
                severity,
            ));
        }
    }

    let bot_neutrality = mean(bot_revs.iter().map(|r| r.neutrality_score));
    let human_neutrality = mean(human_revs.iter().map(|r| r.neutrality_score));
    if let (Some(bot), Some(human)) = (bot_neutrality, human_neutrality) {
        if let Some(severity) = NEUTRALITY_BIAS.grade(human - bot) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::NeutralityBias,
                format!(
                    "Bot revisions score lower on neutrality (bot: {bot:.2}, human: {human:.2})"
                ),
                severity,
            ));
        } else if let Some(severity) = NEUTRALITY_CORRECTION.grade(bot - human) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::NeutralityCorrection,
                format!(
                    "Bot revisions score higher on neutrality (bot: {bot:.2}, human: {human:.2})"
                ),
                severity,
            ));
        }
    }

    let bot_violations: usize = bot_revs.iter().map(|r| r.violation_count).sum();
    let human_violations: usize = human_revs.iter().map(|r| r.violation_count).sum();
    let total_violations = bot_violations + human_violations;
    if total_violations > 0 {
        let share = bot_violations as f64 / total_violations as f64;
        if let Some(severity) = NEUTRALITY_VIOLATIONS.grade(share) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::NeutralityViolationBias,
                format!(
                    "Bots account for {bot_violations}/{total_violations} neutrality violations"
                ),
                severity,
            ));
        }
    }

    if title_mentions(page_title, POLARIZING_KEYWORDS) {
        if let Some(severity) = PERCEPTION_RISK.grade(bot_ratio) {
            indicators.push(BiasIndicator::new(
                IndicatorKind::PerceptionBiasRisk,
                format!(
                    "Bot activity ({:.1}%) on a highly polarized topic may shape reader perception",
                    bot_ratio * 100.0
                ),
                severity,
            ));
        }
    }

    indicators
}
