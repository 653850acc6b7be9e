//! Issue comment entity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a comment on the source tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl CommentId {
    /// Returns the raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CommentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A comment awaiting migration. Ordering is the order in which it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    body: String,
}

impl Comment {
    /// Creates a new comment.
    #[must_use]
    pub fn new(id: impl Into<CommentId>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }

    /// Returns the comment id.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the raw comment body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the first line of the body, used for log previews.
    #[must_use]
    pub fn first_line(&self) -> &str {
        first_line(&self.body)
    }
}

/// Returns the first line of `text`, splitting on any line terminator.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.split(['\r', '\n']).next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let comment = Comment::new(1, "Hello\r\nWorld");
        assert_eq!(comment.first_line(), "Hello");
    }

    #[test]
    fn test_first_line_single_line() {
        assert_eq!(first_line("only"), "only");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_comment_id_display() {
        assert_eq!(CommentId(42).to_string(), "42");
    }
}
