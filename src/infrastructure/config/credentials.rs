//! Credential and target resolution.

use tracing::{debug, info};

use super::loader::ConfigError;
use crate::domain::entities::ApiToken;

/// Repository holding the migrated issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoRef {
    /// Parses an `owner/repo` slug.
    ///
    /// # Errors
    /// Returns `InvalidRepository` for anything else.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository(raw.to_string());
        let (owner, name) = raw.trim().split_once('/').ok_or_else(invalid)?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Resolves the GitHub token.
///
/// Priority:
/// 1. The variable named by `personal_access_token`, looked up with `lookup`
/// 2. `github_token`
///
/// # Errors
/// Returns `MissingGithubToken` if neither source yields a usable token.
pub fn resolve_github_token<F>(
    personal_access_token: Option<&str>,
    github_token: Option<&str>,
    lookup: F,
) -> Result<ApiToken, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(var_name) = personal_access_token.map(str::trim).filter(|s| !s.is_empty()) {
        debug!(variable = var_name, "Resolving personal access token");
        return lookup(var_name)
            .and_then(ApiToken::new)
            .inspect(|_| info!(variable = var_name, "Using personal access token"))
            .ok_or_else(|| {
                ConfigError::MissingGithubToken(format!("environment variable {var_name} is empty"))
            });
    }

    github_token
        .and_then(ApiToken::new)
        .inspect(|_| debug!("Using GITHUB_TOKEN"))
        .ok_or_else(|| ConfigError::MissingGithubToken("GITHUB_TOKEN is not set".to_string()))
}

/// Resolves the Misskey token.
///
/// # Errors
/// Returns `MissingMisskeyToken` if unset or blank.
pub fn resolve_misskey_token(raw: Option<&str>) -> Result<ApiToken, ConfigError> {
    raw.and_then(ApiToken::new)
        .ok_or(ConfigError::MissingMisskeyToken)
}
