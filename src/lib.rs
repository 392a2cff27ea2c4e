//! wikibias - bot bias and neutrality scoring for wiki edit histories
//!
//! Estimates whether automated editors ("bots") introduce measurable
//! linguistic or structural bias into collaboratively edited articles.
//!
//! The pure core works on revision records and never touches the network:
//!
//! - [`classify_author`] - bot or human
//! - [`count_citations`] - `<ref>` markers in wikitext
//! - [`detect_biased_phrases`] - loaded, opinionated, unbalanced and political phrasing
//! - [`analyze_neutrality`] - neutral point of view compliance
//! - [`analyze_revision_series`] - per-edit deltas over an ordered history
//! - [`aggregate_bias_indicators`] - bot vs. human comparison
//!
//! [`topic::TopicAnalyzer`] drives the core over live pages fetched through
//! a [`topic::RevisionSource`] such as [`wiki::WikiClient`].

pub mod config;
pub mod detectors;
pub mod history;
pub mod models;
pub mod reporters;
pub mod revision;
pub mod scoring;
pub mod topic;
pub mod wiki;

pub use detectors::{analyze_neutrality, classify_author, count_citations, detect_biased_phrases};
pub use history::analyze_revision_series;
pub use revision::{parse_revisions, RevisionRecord};
pub use scoring::aggregate_bias_indicators;
