//! Dry-run adapters that read for real and skip every write.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use crate::domain::entities::{
    Comment, CommentId, ContentName, FileId, PostId, PostPayload, first_line,
};
use crate::domain::errors::MigrationResult;
use crate::domain::ports::{CommentSourcePort, PostDestinationPort};

/// Lists comments from the wrapped source but never deletes them.
pub struct DryRunCommentSource {
    inner: Arc<dyn CommentSourcePort>,
}

impl DryRunCommentSource {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn CommentSourcePort>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CommentSourcePort for DryRunCommentSource {
    async fn list_comments(&self, page: u32, per_page: u32) -> MigrationResult<Vec<Comment>> {
        self.inner.list_comments(page, per_page).await
    }

    async fn delete_comment(&self, id: CommentId) -> MigrationResult<()> {
        info!(comment_id = %id, "Dry run: comment would be deleted");
        Ok(())
    }
}

/// Destination that hands out synthetic ids.
#[derive(Debug, Default)]
pub struct DryRunDestination {
    files: AtomicUsize,
    posts: AtomicUsize,
}

impl DryRunDestination {
    /// Creates a new dry-run destination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostDestinationPort for DryRunDestination {
    async fn upload_file(&self, name: &ContentName, bytes: Bytes) -> MigrationResult<FileId> {
        let n = self.files.fetch_add(1, Ordering::Relaxed) + 1;
        info!(name = %name, size = bytes.len(), "Dry run: file would be uploaded");
        Ok(FileId::new(format!("dry-run-file-{n}")))
    }

    async fn create_post(&self, payload: &PostPayload) -> MigrationResult<PostId> {
        let n = self.posts.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            preview = first_line(payload.text().unwrap_or_default()),
            attachments = payload.file_ids().map_or(0, |ids| ids.len()),
            "Dry run: note would be posted"
        );
        Ok(PostId::new(format!("dry-run-note-{n}")))
    }
}
