//! Revision history analysis
//!
//! Walks an ordered revision list and records how each edit changed the
//! page: size, citations, biased phrasing and neutrality. Deltas are always
//! taken between adjacent revisions in the order the caller supplied.

pub mod series;

pub use series::{
    analyze_revision_series, AmplificationEvent, RevisionAssessment, RevisionDelta,
    SeriesAnalysis,
};
