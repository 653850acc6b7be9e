//! GitHub issue comments client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::dto::{CommentResponse, ErrorResponse};
use crate::domain::entities::{ApiToken, Comment, CommentId};
use crate::domain::errors::{MigrationError, MigrationResult};
use crate::domain::ports::CommentSourcePort;
use crate::infrastructure::config::RepoRef;
use crate::infrastructure::http_client::{build_client, describe_transport_error};

/// Default GitHub REST API base.
pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Lists and deletes the comments of one issue.
pub struct GithubClient {
    client: Client,
    api_base: String,
    repo: RepoRef,
    issue: u64,
}

impl GithubClient {
    /// Creates a client for `repo`'s issue `issue`.
    ///
    /// # Errors
    /// Returns error if the token is not a valid header value or the HTTP
    /// client cannot be created.
    pub fn new(
        api_base: impl Into<String>,
        repo: RepoRef,
        issue: u64,
        token: &ApiToken,
        timeout: Duration,
    ) -> Result<Self, GithubClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&token.bearer())
            .map_err(|_| GithubClientError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let client = build_client(timeout, headers)?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            repo,
            issue,
        })
    }

    fn comments_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, self.repo.owner, self.repo.name, self.issue
        )
    }

    fn comment_url(&self, id: CommentId) -> String {
        format!(
            "{}/repos/{}/{}/issues/comments/{}",
            self.api_base, self.repo.owner, self.repo.name, id
        )
    }

    async fn error_message(status: StatusCode, response: reqwest::Response) -> String {
        match response.json::<ErrorResponse>().await {
            Ok(error) => format!("HTTP {status} - {}", error.message),
            Err(_) => format!("HTTP {status}"),
        }
    }
}

/// Errors creating a [`GithubClient`].
#[derive(Debug, thiserror::Error)]
pub enum GithubClientError {
    /// Token contains characters not allowed in a header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,
    /// HTTP client construction failed.
    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
impl CommentSourcePort for GithubClient {
    async fn list_comments(&self, page: u32, per_page: u32) -> MigrationResult<Vec<Comment>> {
        debug!(repo = %self.repo, issue = self.issue, page, per_page, "Listing issue comments");

        let response = self
            .client
            .get(self.comments_url())
            .query(&[
                ("sort", "created".to_string()),
                ("direction", "asc".to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach GitHub");
                MigrationError::comment_fetch(describe_transport_error(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MigrationError::comment_fetch(
                Self::error_message(status, response).await,
            ));
        }

        let comments: Vec<CommentResponse> = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse comment list");
            MigrationError::comment_fetch(format!("failed to parse response: {e}"))
        })?;

        Ok(comments
            .into_iter()
            .map(|c| Comment::new(c.id, c.body.unwrap_or_default()))
            .collect())
    }

    async fn delete_comment(&self, id: CommentId) -> MigrationResult<()> {
        debug!(comment_id = %id, "Deleting issue comment");

        let response = self
            .client
            .delete(self.comment_url(id))
            .send()
            .await
            .map_err(|e| MigrationError::comment_deletion(id, describe_transport_error(&e)))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(MigrationError::comment_deletion(
                id,
                Self::error_message(status, response).await,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GithubClient {
        GithubClient::new(
            "https://api.github.com/",
            RepoRef::parse("owner/repo").unwrap(),
            12,
            &ApiToken::new("token").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_comment_urls() {
        let client = client();
        assert_eq!(
            client.comments_url(),
            "https://api.github.com/repos/owner/repo/issues/12/comments"
        );
        assert_eq!(
            client.comment_url(CommentId(99)),
            "https://api.github.com/repos/owner/repo/issues/comments/99"
        );
    }
}
