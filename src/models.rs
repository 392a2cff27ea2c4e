//! Core data models for wikibias
//!
//! These models are shared by the detectors, the revision-series analyzer
//! and the aggregator, and are what the reporters serialize.

use serde::{Deserialize, Serialize};

/// Severity levels for violations and bias indicators
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// Penalty subtracted from a perfect neutrality score
    pub fn neutrality_weight(&self) -> f64 {
        match self {
            Severity::High => 0.25,
            Severity::Medium => 0.15,
            Severity::Low => 0.10,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Phrase categories scanned by the bias phrase detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasCategory {
    LoadedLanguage,
    Opinionated,
    Unbalanced,
    Political,
}

impl BiasCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiasCategory::LoadedLanguage => "loaded_language",
            BiasCategory::Opinionated => "opinionated",
            BiasCategory::Unbalanced => "unbalanced",
            BiasCategory::Political => "political",
        }
    }
}

impl std::fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One biased phrase found in a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseMatch {
    pub category: BiasCategory,
    /// The matched text, as it appears in the input
    pub phrase: String,
    /// Up to 50 characters on either side of the match
    pub context: String,
}

/// Result of scanning a text for biased phrasing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasAssessment {
    /// Matches per 1000 characters (never divided by less than one unit)
    pub bias_score: f64,
    pub bias_count: usize,
    /// First ten matches in category, pattern, position order
    pub biased_phrases: Vec<PhraseMatch>,
}

/// Kinds of neutral-point-of-view violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingCounterpoints,
    OneSidedArgument,
    ExcessiveLoadedLanguage,
    FirstPersonPov,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingCounterpoints => "missing_counterpoints",
            ViolationKind::OneSidedArgument => "one_sided_argument",
            ViolationKind::ExcessiveLoadedLanguage => "excessive_loaded_language",
            ViolationKind::FirstPersonPov => "first_person_pov",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralityViolation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub description: String,
    pub severity: Severity,
}

/// NPOV compliance grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compliance {
    Poor,
    Moderate,
    Good,
}

impl Compliance {
    /// Grade a neutrality score. The boundaries are fixed.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 0.85 => Compliance::Good,
            s if s >= 0.65 => Compliance::Moderate,
            _ => Compliance::Poor,
        }
    }
}

impl std::fmt::Display for Compliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compliance::Good => write!(f, "good"),
            Compliance::Moderate => write!(f, "moderate"),
            Compliance::Poor => write!(f, "poor"),
        }
    }
}

/// Result of scoring a text against the neutrality policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralityAssessment {
    /// 1.0 is fully neutral, floored at 0.0
    pub neutrality_score: f64,
    pub violations: Vec<NeutralityViolation>,
    pub violation_count: usize,
    pub compliance: Compliance,
}

impl Default for NeutralityAssessment {
    fn default() -> Self {
        Self {
            neutrality_score: 1.0,
            violations: Vec::new(),
            violation_count: 0,
            compliance: Compliance::Good,
        }
    }
}

/// Types of bias indicators the aggregator can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    HighBotRatio,
    CitationBias,
    ContentAmplificationBias,
    MaintenanceBias,
    ControversialTopicBias,
    BiasedLanguageBias,
    BiasedLanguageCorrection,
    NeutralityBias,
    NeutralityCorrection,
    NeutralityViolationBias,
    PerceptionBiasRisk,
}

impl IndicatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::HighBotRatio => "high_bot_ratio",
            IndicatorKind::CitationBias => "citation_bias",
            IndicatorKind::ContentAmplificationBias => "content_amplification_bias",
            IndicatorKind::MaintenanceBias => "maintenance_bias",
            IndicatorKind::ControversialTopicBias => "controversial_topic_bias",
            IndicatorKind::BiasedLanguageBias => "biased_language_bias",
            IndicatorKind::BiasedLanguageCorrection => "biased_language_correction",
            IndicatorKind::NeutralityBias => "neutrality_bias",
            IndicatorKind::NeutralityCorrection => "neutrality_correction",
            IndicatorKind::NeutralityViolationBias => "neutrality_violation_bias",
            IndicatorKind::PerceptionBiasRisk => "perception_bias_risk",
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, severity-graded finding about bot vs. human editing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasIndicator {
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    pub description: String,
    pub severity: Severity,
}

impl BiasIndicator {
    pub fn new(kind: IndicatorKind, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind,
            description: description.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_boundaries() {
        assert_eq!(Compliance::from_score(1.0), Compliance::Good);
        assert_eq!(Compliance::from_score(0.85), Compliance::Good);
        assert_eq!(Compliance::from_score(0.84), Compliance::Moderate);
        assert_eq!(Compliance::from_score(0.75), Compliance::Moderate);
        assert_eq!(Compliance::from_score(0.65), Compliance::Moderate);
        assert_eq!(Compliance::from_score(0.64), Compliance::Poor);
        assert_eq!(Compliance::from_score(0.0), Compliance::Poor);
    }

    #[test]
    fn test_compliance_is_monotonic() {
        let scores: Vec<f64> = (0..=100).map(|i| i as f64 / 100.0).collect();
        for pair in scores.windows(2) {
            assert!(Compliance::from_score(pair[1]) >= Compliance::from_score(pair[0]));
        }
    }

    #[test]
    fn test_serialized_names() {
        let indicator = BiasIndicator::new(IndicatorKind::HighBotRatio, "x", Severity::High);
        let json = serde_json::to_value(&indicator).expect("serialize indicator");
        assert_eq!(json["type"], "high_bot_ratio");
        assert_eq!(json["severity"], "high");

        let json = serde_json::to_value(BiasCategory::LoadedLanguage).expect("serialize category");
        assert_eq!(json, "loaded_language");
    }
}
