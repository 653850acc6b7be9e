//! Comment source port definition.

use async_trait::async_trait;

use crate::domain::entities::{Comment, CommentId};
use crate::domain::errors::MigrationResult;

/// Port for the issue tracker holding comments to migrate.
#[async_trait]
pub trait CommentSourcePort: Send + Sync {
    /// Lists one page of outstanding comments, oldest first. Pages start at 1.
    async fn list_comments(&self, page: u32, per_page: u32) -> MigrationResult<Vec<Comment>>;

    /// Deletes a migrated comment.
    async fn delete_comment(&self, id: CommentId) -> MigrationResult<()>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::errors::MigrationError;
    use crate::domain::ports::mocks::Journal;
    use parking_lot::Mutex;

    /// In-memory comment source for testing.
    pub struct MockCommentSource {
        comments: Mutex<Vec<Comment>>,
        pages: Mutex<Vec<(u32, u32)>>,
        deleted: Mutex<Vec<CommentId>>,
        never_drain: bool,
        fail_delete: bool,
        journal: Journal,
    }

    impl MockCommentSource {
        /// Creates a source holding `comments`.
        pub fn new(comments: Vec<Comment>) -> Self {
            Self {
                comments: Mutex::new(comments),
                pages: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
                never_drain: false,
                fail_delete: false,
                journal: Journal::default(),
            }
        }

        /// Creates a source with `count` numbered comments.
        pub fn numbered(count: u64) -> Self {
            Self::new(
                (1..=count)
                    .map(|id| Comment::new(id, format!("comment {id}")))
                    .collect(),
            )
        }

        /// Deletions are acknowledged but comments keep coming back.
        #[must_use]
        pub fn never_draining(mut self) -> Self {
            self.never_drain = true;
            self
        }

        /// Every deletion fails.
        #[must_use]
        pub fn failing_deletes(mut self) -> Self {
            self.fail_delete = true;
            self
        }

        /// Records calls into a shared journal.
        #[must_use]
        pub fn with_journal(mut self, journal: Journal) -> Self {
            self.journal = journal;
            self
        }

        /// Returns `(page, per_page)` for every list call.
        pub fn page_requests(&self) -> Vec<(u32, u32)> {
            self.pages.lock().clone()
        }

        /// Returns deleted ids in deletion order.
        pub fn deleted(&self) -> Vec<CommentId> {
            self.deleted.lock().clone()
        }

        /// Returns the comments still outstanding.
        pub fn remaining(&self) -> usize {
            self.comments.lock().len()
        }
    }

    #[async_trait]
    impl CommentSourcePort for MockCommentSource {
        async fn list_comments(&self, page: u32, per_page: u32) -> MigrationResult<Vec<Comment>> {
            self.pages.lock().push((page, per_page));
            self.journal.lock().push(format!("list:{page}"));
            let comments = self.comments.lock();
            let start = (page.saturating_sub(1) * per_page) as usize;
            Ok(comments
                .iter()
                .skip(start)
                .take(per_page as usize)
                .cloned()
                .collect())
        }

        async fn delete_comment(&self, id: CommentId) -> MigrationResult<()> {
            self.journal.lock().push(format!("delete:{id}"));
            if self.fail_delete {
                return Err(MigrationError::comment_deletion(id, "mock rejection"));
            }
            self.deleted.lock().push(id);
            if !self.never_drain {
                self.comments.lock().retain(|c| c.id() != id);
            }
            Ok(())
        }
    }
}
