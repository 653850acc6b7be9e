//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Attachment downloading.
pub mod download;
/// Dry-run adapters.
pub mod dry_run;
/// GitHub API client.
pub mod github;
/// Shared HTTP client construction.
pub mod http_client;
/// Misskey API client.
pub mod misskey;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigLoader, LogLevel, Visibility};
pub use download::HttpFileFetcher;
pub use dry_run::{DryRunCommentSource, DryRunDestination};
pub use github::GithubClient;
pub use misskey::MisskeyClient;
