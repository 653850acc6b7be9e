//! Post destination port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::{ContentName, FileId, PostId, PostPayload};
use crate::domain::errors::MigrationResult;

/// Port for the platform receiving migrated posts.
#[async_trait]
pub trait PostDestinationPort: Send + Sync {
    /// Stores a file and returns its destination id.
    async fn upload_file(&self, name: &ContentName, bytes: Bytes) -> MigrationResult<FileId>;

    /// Creates a post from a composed payload.
    async fn create_post(&self, payload: &PostPayload) -> MigrationResult<PostId>;
}
