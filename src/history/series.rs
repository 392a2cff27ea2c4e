//! Revision-series analysis
//!
//! Leaf assessments (author, citations, bias, neutrality, size) are computed
//! exactly once per revision. The per-revision work is independent, so it is
//! fanned out with rayon; the fold that produces deltas is sequential.

use crate::detectors::{analyze_neutrality, classify_author, count_citations, detect_biased_phrases};
use crate::models::Compliance;
use crate::revision::RevisionRecord;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Growth factor over the previous revision that counts as amplification
const AMPLIFICATION_FACTOR: f64 = 1.5;

/// Leaf results for a single revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionAssessment {
    pub revid: Option<u64>,
    pub timestamp: Option<String>,
    pub user: String,
    pub is_bot: bool,
    /// Content length in characters
    pub size: usize,
    pub citations: usize,
    pub bias_score: f64,
    pub bias_count: usize,
    pub neutrality_score: f64,
    pub violation_count: usize,
    pub compliance: Compliance,
}

impl RevisionAssessment {
    pub fn assess(revision: &RevisionRecord) -> Self {
        let content = revision.content();
        let bias = detect_biased_phrases(content);
        let neutrality = analyze_neutrality(content);

        Self {
            revid: revision.revid,
            timestamp: revision.timestamp.clone(),
            user: revision.display_user().to_string(),
            is_bot: classify_author(revision),
            size: revision.size(),
            citations: count_citations(content),
            bias_score: bias.bias_score,
            bias_count: bias.bias_count,
            neutrality_score: neutrality.neutrality_score,
            violation_count: neutrality.violation_count,
            compliance: neutrality.compliance,
        }
    }
}

/// Change introduced by one revision relative to the one before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionDelta {
    pub revid: Option<u64>,
    pub timestamp: Option<String>,
    pub size_delta: i64,
    pub citation_delta: i64,
    /// Difference in biased phrase count
    pub bias_delta: i64,
    pub neutrality_delta: f64,
    pub is_bot: bool,
    pub user: String,
}

/// A revision whose size jumped past 1.5x the previous revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplificationEvent {
    pub revid: Option<u64>,
    pub timestamp: Option<String>,
    pub size_increase: i64,
    pub is_bot: bool,
    pub user: String,
}

/// Output of [`analyze_revision_series`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesAnalysis {
    /// One entry per input revision, in input order
    pub revisions: Vec<RevisionAssessment>,
    /// One entry per adjacent pair; empty for fewer than two revisions
    pub deltas: Vec<RevisionDelta>,
    pub amplifications: Vec<AmplificationEvent>,
    pub bot_revisions: usize,
    pub human_revisions: usize,
}

impl SeriesAnalysis {
    pub fn total_revisions(&self) -> usize {
        self.bot_revisions + self.human_revisions
    }

    /// Fraction of revisions made by bots, 0 for an empty series
    pub fn bot_ratio(&self) -> f64 {
        match self.total_revisions() {
            0 => 0.0,
            total => self.bot_revisions as f64 / total as f64,
        }
    }

    /// Split deltas into (bot, human)
    pub fn deltas_by_author(&self) -> (Vec<&RevisionDelta>, Vec<&RevisionDelta>) {
        self.deltas.iter().partition(|d| d.is_bot)
    }

    /// Split revision assessments into (bot, human)
    pub fn revisions_by_author(&self) -> (Vec<&RevisionAssessment>, Vec<&RevisionAssessment>) {
        self.revisions.iter().partition(|r| r.is_bot)
    }

    pub fn bot_amplifications(&self) -> usize {
        self.amplifications.iter().filter(|a| a.is_bot).count()
    }
}

/// Analyze an ordered revision list.
///
/// Revisions are consumed in the order given; nothing is re-sorted. The
/// first revision has no delta, but is compared against a size of zero for
/// amplification, so a non-empty first revision always amplifies.
pub fn analyze_revision_series(revisions: &[RevisionRecord]) -> SeriesAnalysis {
    let assessments: Vec<RevisionAssessment> =
        revisions.par_iter().map(RevisionAssessment::assess).collect();

    let mut analysis = SeriesAnalysis::default();
    let mut previous: Option<&RevisionAssessment> = None;

    for current in &assessments {
        if let Some(prev) = previous {
            analysis.deltas.push(RevisionDelta {
                revid: current.revid,
                timestamp: current.timestamp.clone(),
                size_delta: current.size as i64 - prev.size as i64,
                citation_delta: current.citations as i64 - prev.citations as i64,
                bias_delta: current.bias_count as i64 - prev.bias_count as i64,
                neutrality_delta: current.neutrality_score - prev.neutrality_score,
                is_bot: current.is_bot,
                user: current.user.clone(),
            });
        }

        if current.is_bot {
            analysis.bot_revisions += 1;
        } else {
            analysis.human_revisions += 1;
        }

        let prev_size = previous.map_or(0, |p| p.size);
        if current.size as f64 > prev_size as f64 * AMPLIFICATION_FACTOR {
            analysis.amplifications.push(AmplificationEvent {
                revid: current.revid,
                timestamp: current.timestamp.clone(),
                size_increase: current.size as i64 - prev_size as i64,
                is_bot: current.is_bot,
                user: current.user.clone(),
            });
        }

        previous = Some(current);
    }

    analysis.revisions = assessments;
    analysis
}
