//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::application::use_cases::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PER_PAGE};
use crate::infrastructure::github::GITHUB_API_BASE;

const APP_NAME: &str = "issue2misskey";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Note visibility on the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to everyone, listed on public timelines.
    Public,
    /// Visible to everyone, not listed on public timelines.
    Home,
    /// Followers only.
    Followers,
    /// Mentioned users only.
    Specified,
}

impl Visibility {
    /// Returns the API value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Home => "home",
            Self::Followers => "followers",
            Self::Specified => "specified",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings read from the optional TOML file, overridable from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Passes allowed before remaining comments count as a failure.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Comments requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Visibility applied unless a comment's directive block sets one.
    #[serde(default)]
    pub default_visibility: Option<Visibility>,

    /// Origin whose attachment URLs receive the GitHub token.
    #[serde(default = "default_source_origin")]
    pub source_origin: String,

    /// GitHub REST API base URL.
    #[serde(default = "default_github_api_base")]
    pub github_api_base: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_source_origin() -> String {
    "https://github.com".to_string()
}

fn default_github_api_base() -> String {
    GITHUB_API_BASE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            per_page: default_per_page(),
            default_visibility: None,
            source_origin: default_source_origin(),
            github_api_base: default_github_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: LogLevel::default(),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(max_attempts) = args.max_attempts {
            self.max_attempts = max_attempts;
        }
        if let Some(per_page) = args.per_page {
            self.per_page = per_page;
        }
        if let Some(visibility) = args.default_visibility {
            self.default_visibility = Some(visibility);
        }
        if let Some(source_origin) = &args.source_origin {
            self.source_origin.clone_from(source_origin);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
