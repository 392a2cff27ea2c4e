//! Bias-pattern scoring
//!
//! Turns a [`SeriesAnalysis`](crate::history::SeriesAnalysis) into a list of
//! severity-graded bias indicators.
//!
//! # Checks (in emission order)
//!
//! | Indicator                     | Signal                                  | Trigger |
//! |-------------------------------|-----------------------------------------|---------|
//! | `high_bot_ratio`              | bot share of revisions                  | > 0.3   |
//! | `citation_bias`               | \|bot - human\| mean citation delta      | > 1.0   |
//! | `content_amplification_bias`  | bot share of amplification events       | > 0.5   |
//! | `maintenance_bias`            | bot mean \|size delta\| vs human        | < 50%   |
//! | `controversial_topic_bias`    | bot ratio, controversial title          | > 0.2   |
//! | `biased_language_*`           | ratio of mean bias scores               | > 1.2   |
//! | `neutrality_*`                | difference of mean neutrality scores    | > 0.15  |
//! | `neutrality_violation_bias`   | bot share of violations                 | > 0.6   |
//! | `perception_bias_risk`        | bot ratio, polarizing title             | > 0.15  |
//!
//! Severity for each check comes from a [`SeverityLadder`].

mod indicators;
mod ladder;

pub use indicators::{aggregate_bias_indicators, CONTROVERSIAL_KEYWORDS, POLARIZING_KEYWORDS};
pub use ladder::SeverityLadder;
