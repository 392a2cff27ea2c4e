//! Revision records as returned by the MediaWiki Action API
//!
//! Every field is optional on the wire. Defaults are resolved here, by the
//! accessor methods, so callers never need to look into the raw structure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content-bearing slot of a revision (`slots.main`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Legacy (`formatversion=1`) content key
    #[serde(rename = "*", default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<SlotContent>,
}

/// One saved edit of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    #[serde(default)]
    pub revid: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub flags: Option<String>,
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Slots>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "*", default, skip_serializing_if = "Option::is_none")]
    pub legacy_content: Option<String>,
}

/// The API sometimes sends `tags` as something other than a list of strings.
/// Anything that is not a list is treated as no tags.
fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    })
}

impl RevisionRecord {
    /// Build a record with content in the main slot
    pub fn new(user: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            slots: Some(Slots {
                main: Some(SlotContent {
                    content: Some(content.into()),
                    legacy: None,
                }),
            }),
            ..Default::default()
        }
    }

    pub fn with_revid(mut self, revid: u64) -> Self {
        self.revid = Some(revid);
        self
    }

    pub fn with_flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or("")
    }

    /// Username for display, "Unknown" when absent
    pub fn display_user(&self) -> &str {
        self.user.as_deref().unwrap_or("Unknown")
    }

    pub fn flags(&self) -> &str {
        self.flags.as_deref().unwrap_or("")
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Resolve the revision text.
    ///
    /// Lookup order: `slots.main.content`, `slots.main.*`, `content`, `*`.
    /// The first non-empty value wins; an empty string when none is present.
    pub fn content(&self) -> &str {
        let main = self.slots.as_ref().and_then(|s| s.main.as_ref());
        let candidates = [
            main.and_then(|m| m.content.as_deref()),
            main.and_then(|m| m.legacy.as_deref()),
            self.content.as_deref(),
            self.legacy_content.as_deref(),
        ];
        candidates
            .into_iter()
            .flatten()
            .find(|c| !c.is_empty())
            .unwrap_or("")
    }

    /// Content length in characters
    pub fn size(&self) -> usize {
        self.content().chars().count()
    }
}

/// Malformed revision input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("expected an ordered array of revisions, found {found}")]
    NotASequence { found: &'static str },

    #[error("revision at index {index} is malformed: {source}")]
    MalformedRevision {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Parse an ordered sequence of revisions, failing fast on anything that is
/// not a JSON array of revision objects.
pub fn parse_revisions(value: &serde_json::Value) -> Result<Vec<RevisionRecord>, InputError> {
    let items = value.as_array().ok_or(InputError::NotASequence {
        found: json_kind(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(InputError::MalformedRevision {
                    index,
                    source: <serde_json::Error as serde::de::Error>::custom(format!(
                        "expected an object, found {}",
                        json_kind(item)
                    )),
                });
            }
            RevisionRecord::deserialize(item)
                .map_err(|source| InputError::MalformedRevision { index, source })
        })
        .collect()
}

/// Parse revisions from JSON text
pub fn parse_revisions_str(json: &str) -> Result<Vec<RevisionRecord>, InputError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    parse_revisions(&value)
}
