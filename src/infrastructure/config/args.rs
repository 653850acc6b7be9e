use super::app_config::{LogLevel, Visibility};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "issue2misskey",
    version,
    about = "Moves GitHub issue comments to Misskey notes",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "ISSUE2MISSKEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository holding the issue, as `owner/repo`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Issue whose comments are migrated.
    #[arg(long, env = "ISSUE_NUMBER")]
    pub issue: u64,

    /// GitHub token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Name of the environment variable holding a personal access token.
    /// Takes precedence over `--github-token`.
    #[arg(long, env = "PERSONAL_ACCESS_TOKEN")]
    pub personal_access_token: Option<String>,

    /// Misskey server host name.
    #[arg(long, env = "MISSKEY_SERVER")]
    pub misskey_server: String,

    /// Misskey API token.
    #[arg(long, env = "MISSKEY_API_TOKEN", hide_env_values = true)]
    pub misskey_token: Option<String>,

    /// Parse and download everything, but do not post or delete.
    #[arg(
        long,
        env = "DRY_RUN",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub dry_run: bool,

    /// Passes allowed before remaining comments count as a failure.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Comments requested per page.
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Visibility applied unless a comment sets its own.
    #[arg(long, value_enum)]
    pub default_visibility: Option<Visibility>,

    /// Origin whose attachment URLs receive the GitHub token.
    #[arg(long, value_name = "URL")]
    pub source_origin: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}
