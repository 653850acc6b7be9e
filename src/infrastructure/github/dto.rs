use serde::Deserialize;

/// GitHub issue comment response structure.
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    /// Comment id.
    pub id: u64,
    /// Markdown body; GitHub may return null for empty comments.
    #[serde(default)]
    pub body: Option<String>,
}

/// GitHub API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from GitHub.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_with_null_body() {
        let comment: CommentResponse =
            serde_json::from_str(r#"{"id": 5, "body": null, "user": {"login": "x"}}"#).unwrap();
        assert_eq!(comment.id, 5);
        assert!(comment.body.is_none());
    }
}
