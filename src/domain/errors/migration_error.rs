//! Migration error types.

use thiserror::Error;

use crate::domain::entities::CommentId;

/// Every way a migration run can fail.
///
/// None of these are recovered locally: each aborts the run.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum MigrationError {
    #[error("malformed directive block: {reason}")]
    MalformedDirective { reason: String },

    #[error("failed to download {locator}: {}", describe_status(*status, message))]
    Download {
        locator: String,
        status: Option<u16>,
        message: String,
    },

    #[error("failed to upload {name}: {message}")]
    Upload { name: String, message: String },

    #[error("failed to create post: {message}")]
    PostCreation { message: String },

    #[error("failed to fetch comments: {message}")]
    CommentFetch { message: String },

    #[error("failed to delete comment {comment_id}: {message}")]
    CommentDeletion {
        comment_id: CommentId,
        message: String,
    },

    #[error("comments still remain after {attempts} migration passes")]
    RetryBudgetExhausted { attempts: u32 },
}

fn describe_status(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) if message.is_empty() => format!("HTTP {code}"),
        Some(code) => format!("HTTP {code} {message}"),
        None => message.to_string(),
    }
}

impl MigrationError {
    /// Creates malformed directive error.
    #[must_use]
    pub fn malformed_directive(reason: impl Into<String>) -> Self {
        Self::MalformedDirective {
            reason: reason.into(),
        }
    }

    /// Creates download error for a non-success response.
    #[must_use]
    pub fn download_status(locator: impl Into<String>, status: u16) -> Self {
        Self::Download {
            locator: locator.into(),
            status: Some(status),
            message: String::new(),
        }
    }

    /// Creates download error without a response.
    #[must_use]
    pub fn download(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            locator: locator.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Creates upload error.
    #[must_use]
    pub fn upload(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upload {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates post creation error.
    #[must_use]
    pub fn post_creation(message: impl Into<String>) -> Self {
        Self::PostCreation {
            message: message.into(),
        }
    }

    /// Creates comment fetch error.
    #[must_use]
    pub fn comment_fetch(message: impl Into<String>) -> Self {
        Self::CommentFetch {
            message: message.into(),
        }
    }

    /// Creates comment deletion error.
    #[must_use]
    pub fn comment_deletion(comment_id: CommentId, message: impl Into<String>) -> Self {
        Self::CommentDeletion {
            comment_id,
            message: message.into(),
        }
    }

    /// Returns whether the run ended because the source never drained.
    ///
    /// This is an expected terminal state rather than a defect.
    #[must_use]
    pub const fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::RetryBudgetExhausted { .. })
    }

    /// Process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_budget_exhausted() { 2 } else { 1 }
    }
}
