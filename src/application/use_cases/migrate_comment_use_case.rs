//! Single comment migration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::services::{
    AttachmentExtractor, DirectiveParser, PostComposer, ResourceCache, UploadRegistry,
};
use crate::domain::entities::{Comment, PostId, PostPayload};
use crate::domain::errors::MigrationResult;
use crate::domain::ports::{CommentSourcePort, FileFetcherPort, PostDestinationPort};

/// State shared by every comment of one migration run.
#[derive(Debug)]
pub struct MigrationSession {
    /// Downloaded resources keyed by locator.
    pub cache: ResourceCache,
    /// Files already uploaded this run.
    pub uploads: UploadRegistry,
}

impl MigrationSession {
    /// Starts an empty session.
    #[must_use]
    pub fn new(fetcher: Arc<dyn FileFetcherPort>) -> Self {
        Self {
            cache: ResourceCache::new(fetcher),
            uploads: UploadRegistry::new(),
        }
    }
}

/// Turns one comment into a post, then deletes the comment.
#[derive(Clone)]
pub struct MigrateCommentUseCase {
    source: Arc<dyn CommentSourcePort>,
    destination: Arc<dyn PostDestinationPort>,
    composer: PostComposer,
}

impl MigrateCommentUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        source: Arc<dyn CommentSourcePort>,
        destination: Arc<dyn PostDestinationPort>,
        composer: PostComposer,
    ) -> Self {
        Self {
            source,
            destination,
            composer,
        }
    }

    /// Parses, resolves attachments, uploads them in reading order and
    /// composes the payload for `comment`.
    ///
    /// # Errors
    /// Returns `MalformedDirective`, `Download` or `Upload`.
    pub async fn prepare(
        &self,
        comment: &Comment,
        session: &mut MigrationSession,
    ) -> MigrationResult<PostPayload> {
        let parsed = DirectiveParser::parse(comment.body())?;
        let extraction = AttachmentExtractor::extract(&parsed.body);

        debug!(
            comment_id = %comment.id(),
            attachments = extraction.references.len(),
            directives = parsed.directives.as_map().len(),
            "Parsed comment"
        );

        let resources = session.cache.resolve_all(extraction.locators()).await?;

        let mut file_ids = Vec::with_capacity(resources.len());
        for (reference, bytes) in extraction.references.iter().zip(resources) {
            let id = session
                .uploads
                .upload(self.destination.as_ref(), &reference.locator, bytes)
                .await?;
            if !file_ids.contains(&id) {
                file_ids.push(id);
            }
        }

        Ok(self
            .composer
            .compose(&extraction.body, &file_ids, parsed.directives))
    }

    /// Migrates `comment`: the post is created before the comment is deleted,
    /// so a failure in between leaves the comment to be migrated again.
    ///
    /// # Errors
    /// Returns the first failure of any stage.
    pub async fn execute(
        &self,
        comment: &Comment,
        session: &mut MigrationSession,
    ) -> MigrationResult<PostId> {
        let payload = self.prepare(comment, session).await?;

        let post_id = self.destination.create_post(&payload).await?;
        self.source.delete_comment(comment.id()).await?;

        info!(
            comment_id = %comment.id(),
            post_id = %post_id,
            preview = comment.first_line(),
            "Migrated comment"
        );

        Ok(post_id)
    }
}
