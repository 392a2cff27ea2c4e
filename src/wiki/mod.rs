//! MediaWiki Action API access
//!
//! Uses ureq (sync HTTP), so no async runtime is needed. Two queries are
//! issued:
//!
//! - `list=search` to turn a topic into page titles
//! - `prop=revisions` (formatversion 2, main slot content) for a page history

mod client;

pub use client::WikiClient;

use thiserror::Error;

/// Errors that can occur while talking to the wiki
#[derive(Error, Debug)]
pub enum WikiError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

pub type WikiResult<T> = std::result::Result<T, WikiError>;
