//! Per-revision detectors
//!
//! Each detector is a pure function over one revision or one text blob.
//! The revision-series analyzer runs all four once per revision and reuses
//! the results for every derived delta.
//!
//! ```text
//! RevisionRecord ──┬── author::classify_author        -> bool
//!                  └── content() ─┬── citations::count_citations    -> usize
//!                                 ├── phrases::detect_biased_phrases -> BiasAssessment
//!                                 └── neutrality::analyze_neutrality -> NeutralityAssessment
//! ```

pub mod author;
pub mod citations;
pub mod neutrality;
pub mod phrases;

pub use author::classify_author;
pub use citations::count_citations;
pub use neutrality::analyze_neutrality;
pub use phrases::detect_biased_phrases;
