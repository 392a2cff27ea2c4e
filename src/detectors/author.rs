//! Bot vs. human author classification

use crate::revision::RevisionRecord;

/// Username fragments that mark an account as automated
const BOT_NAME_MARKERS: &[&str] = &["bot", "automated", "script", "maintenance"];

/// Decide whether a revision was made by a bot.
///
/// First match wins: the `bot` flag, then any tag containing "bot", then
/// username heuristics. All comparisons are case-insensitive.
pub fn classify_author(revision: &RevisionRecord) -> bool {
    if revision.flags().to_lowercase().contains("bot") {
        return true;
    }

    if revision
        .tags()
        .iter()
        .any(|t| t.to_lowercase().contains("bot"))
    {
        return true;
    }

    let user = revision.user().to_lowercase();
    BOT_NAME_MARKERS.iter().any(|m| user.contains(m))
}
