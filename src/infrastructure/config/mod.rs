//! Application configuration.

/// Settings file model.
pub mod app_config;
/// Command line arguments.
pub mod args;
/// Credential and target resolution.
pub mod credentials;
/// Settings file loading.
pub mod loader;

pub use app_config::{AppConfig, LogLevel, Visibility};
pub use args::CliArgs;
pub use credentials::{RepoRef, resolve_github_token, resolve_misskey_token};
pub use loader::{ConfigError, ConfigLoader};
