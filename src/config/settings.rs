//! Runtime settings for wikibias
//!
//! Supports loading settings from:
//! - Built-in defaults
//! - ~/.config/wikibias/config.toml
//! - ./wikibias.toml (or an explicit `--config` path)
//! - Environment variables

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "wikibias.toml";

pub const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str =
    concat!("wikibias/", env!("CARGO_PKG_VERSION"), " (bot-bias research)");

/// Controversial topics analyzed by `wikibias run` when none are given
pub const DEFAULT_TOPICS: &[&str] = &[
    "climate change",
    "vaccination",
    "artificial intelligence",
    "gun control",
    "abortion",
    "immigration",
    "renewable energy",
    "genetic engineering",
    "social media",
    "cryptocurrency",
];

/// Example config written by `wikibias init`
pub const EXAMPLE_CONFIG: &str = r#"# wikibias configuration

[api]
# MediaWiki Action API endpoint
endpoint = "https://en.wikipedia.org/w/api.php"

# Identify yourself to the wiki operators
# user_agent = "wikibias/0.3 (you@example.org)"

# Request timeout in seconds
timeout_secs = 20

[analysis]
# Pages fetched per topic search
pages_per_topic = 3

# Revisions fetched per page (newest first)
revisions_per_page = 30

# Pause between page fetches, in milliseconds
rate_limit_ms = 500

# Topics for `wikibias run` when none are given on the command line
topics = [
    "climate change",
    "vaccination",
    "artificial intelligence",
    "gun control",
    "abortion",
]
topic_limit = 5
"#;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSettings {
    pub pages_per_topic: usize,
    pub revisions_per_page: usize,
    pub rate_limit_ms: u64,
    pub topics: Vec<String>,
    /// How many of `topics` a default run covers
    pub topic_limit: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 20,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            pages_per_topic: 3,
            revisions_per_page: 30,
            rate_limit_ms: 500,
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            topic_limit: 5,
        }
    }
}

/// On-disk shape of a config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub api: ApiFile,
    #[serde(default)]
    pub analysis: AnalysisFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiFile {
    pub endpoint: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisFile {
    pub pages_per_topic: Option<usize>,
    pub revisions_per_page: Option<usize>,
    pub rate_limit_ms: Option<u64>,
    pub topics: Option<Vec<String>>,
    pub topic_limit: Option<usize>,
}

impl SettingsFile {
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }
}

impl Settings {
    /// Load settings from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. `explicit` path, or ./wikibias.toml when no path is given
    /// 3. User config (~/.config/wikibias/config.toml)
    /// 4. Defaults
    ///
    /// Broken user or project files are skipped with a warning. A broken
    /// explicit path is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            settings.merge_optional(&path);
        }

        match explicit {
            Some(path) => {
                let file = SettingsFile::read(path)?;
                debug!("Loaded config from {}", path.display());
                settings.merge(file);
            }
            None => {
                let project = Path::new(PROJECT_CONFIG_FILE);
                if project.exists() {
                    settings.merge_optional(project);
                }
            }
        }

        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wikibias").join("config.toml"))
    }

    fn merge_optional(&mut self, path: &Path) {
        match SettingsFile::read(path) {
            Ok(file) => {
                debug!("Loaded config from {}", path.display());
                self.merge(file);
            }
            Err(e) => warn!("Ignoring config file: {:#}", e),
        }
    }

    /// Merge a config file into these settings (file takes priority)
    pub fn merge(&mut self, file: SettingsFile) {
        let SettingsFile { api, analysis } = file;

        if let Some(endpoint) = api.endpoint {
            self.api.endpoint = endpoint;
        }
        if let Some(user_agent) = api.user_agent {
            self.api.user_agent = user_agent;
        }
        if let Some(timeout) = api.timeout_secs {
            self.api.timeout_secs = timeout;
        }

        if let Some(pages) = analysis.pages_per_topic {
            self.analysis.pages_per_topic = pages;
        }
        if let Some(revisions) = analysis.revisions_per_page {
            self.analysis.revisions_per_page = revisions;
        }
        if let Some(pause) = analysis.rate_limit_ms {
            self.analysis.rate_limit_ms = pause;
        }
        if let Some(topics) = analysis.topics {
            self.analysis.topics = topics;
        }
        if let Some(limit) = analysis.topic_limit {
            self.analysis.topic_limit = limit;
        }
    }

    /// Apply `WIKIBIAS_API_URL` and `WIKIBIAS_USER_AGENT` overrides
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("WIKIBIAS_API_URL").filter(|v| !v.is_empty()) {
            self.api.endpoint = url;
        }
        if let Some(agent) = lookup("WIKIBIAS_USER_AGENT").filter(|v| !v.is_empty()) {
            self.api.user_agent = agent;
        }
    }

    /// Topics covered by a run with no explicit topic list
    pub fn default_topics(&self) -> Vec<String> {
        self.analysis
            .topics
            .iter()
            .take(self.analysis.topic_limit)
            .cloned()
            .collect()
    }
}
