//! JSON reporter
//!
//! Outputs the full RunReport as pretty-printed JSON. This is the results
//! file format written by `wikibias run -o`.

use crate::topic::RunReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
