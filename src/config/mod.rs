//! Configuration module for wikibias
//!
//! This module handles:
//! - API endpoint, user agent and timeouts
//! - Per-topic fetch limits and the pause between page fetches
//! - The default topic list for batch runs

mod settings;

pub use settings::{
    AnalysisSettings,
    ApiSettings,
    Settings,
    SettingsFile,
    DEFAULT_ENDPOINT,
    DEFAULT_TOPICS,
    DEFAULT_USER_AGENT,
    EXAMPLE_CONFIG,
    PROJECT_CONFIG_FILE,
};
