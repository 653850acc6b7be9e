//! Outstanding comment retrieval.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::Comment;
use crate::domain::errors::MigrationResult;
use crate::domain::ports::CommentSourcePort;

/// Default number of comments requested per page.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Pages through every outstanding comment on the source.
#[derive(Clone)]
pub struct FetchCommentsUseCase {
    source: Arc<dyn CommentSourcePort>,
    per_page: u32,
}

impl FetchCommentsUseCase {
    /// Creates new use case. A zero page size is raised to one.
    #[must_use]
    pub fn new(source: Arc<dyn CommentSourcePort>, per_page: u32) -> Self {
        Self {
            source,
            per_page: per_page.max(1),
        }
    }

    /// Fetches all pages, stopping at the first page shorter than the page size.
    ///
    /// # Errors
    /// Returns `CommentFetch` if any page request fails.
    pub async fn execute(&self) -> MigrationResult<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut page = 1_u32;

        loop {
            let chunk = self.source.list_comments(page, self.per_page).await?;
            let chunk_len = chunk.len();
            debug!(page, count = chunk_len, "Fetched comment page");
            comments.extend(chunk);

            if chunk_len < self.per_page as usize {
                break;
            }
            page = page.saturating_add(1);
        }

        Ok(comments)
    }
}
