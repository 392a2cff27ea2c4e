//! Blocking MediaWiki client

use super::{WikiError, WikiResult};
use crate::config::ApiSettings;
use crate::revision::RevisionRecord;
use crate::topic::{PageRevisions, RevisionSource};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REVISION_PROPS: &str = "ids|timestamp|user|comment|flags|size|tags|content";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    error: Option<ApiErrorBody>,
    #[serde(default)]
    query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct RevisionsResponse {
    error: Option<ApiErrorBody>,
    #[serde(default)]
    query: PagesQuery,
}

#[derive(Debug, Default, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    pageid: Option<u64>,
    #[serde(default)]
    revisions: Option<Vec<RevisionRecord>>,
}

impl SearchResponse {
    fn into_titles(self) -> WikiResult<Vec<String>> {
        if let Some(err) = self.error {
            return Err(WikiError::Api {
                code: err.code,
                info: err.info,
            });
        }
        Ok(self.query.search.into_iter().map(|hit| hit.title).collect())
    }
}

impl RevisionsResponse {
    /// First page only; a missing page yields no revisions
    fn into_page(self) -> WikiResult<PageRevisions> {
        if let Some(err) = self.error {
            return Err(WikiError::Api {
                code: err.code,
                info: err.info,
            });
        }
        Ok(self
            .query
            .pages
            .into_iter()
            .next()
            .map(|page| PageRevisions {
                pageid: page.pageid,
                revisions: page.revisions.unwrap_or_default(),
            })
            .unwrap_or_default())
    }
}

/// Sync HTTP client for one MediaWiki endpoint
pub struct WikiClient {
    endpoint: String,
    user_agent: String,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl WikiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            user_agent: settings.user_agent.clone(),
            agent: make_agent(Duration::from_secs(settings.timeout_secs)),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> WikiResult<T> {
        let mut req = self
            .agent
            .get(&self.endpoint)
            .header("User-Agent", &self.user_agent);
        for &(key, value) in params {
            req = req.query(key, value);
        }

        let response = req.call().map_err(|e| WikiError::Request {
            url: self.endpoint.clone(),
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(WikiError::Status {
                url: self.endpoint.clone(),
                status,
            });
        }

        response
            .into_body()
            .read_json()
            .map_err(|e| WikiError::Parse(e.to_string()))
    }

    /// Titles of up to `limit` pages matching `query`
    pub fn search(&self, query: &str, limit: usize) -> WikiResult<Vec<String>> {
        debug!("Searching '{}' (limit {})", query, limit);
        let limit = limit.to_string();
        let response: SearchResponse = self.get(&[
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
        ])?;
        response.into_titles()
    }

    /// Up to `limit` revisions of `title`, newest first, with main-slot content
    pub fn revisions(&self, title: &str, limit: usize) -> WikiResult<PageRevisions> {
        debug!("Fetching {} revisions of '{}'", limit, title);
        let limit = limit.to_string();
        let response: RevisionsResponse = self.get(&[
            ("action", "query"),
            ("prop", "revisions"),
            ("titles", title),
            ("rvprop", REVISION_PROPS),
            ("rvslots", "main"),
            ("rvlimit", limit.as_str()),
            ("format", "json"),
            ("formatversion", "2"),
        ])?;
        response.into_page()
    }
}

impl RevisionSource for WikiClient {
    fn search_pages(&self, query: &str, limit: usize) -> anyhow::Result<Vec<String>> {
        Ok(self.search(query, limit)?)
    }

    fn fetch_revisions(&self, title: &str, limit: usize) -> anyhow::Result<PageRevisions> {
        Ok(self.revisions(title, limit)?)
    }
}
