//! Run-scoped record of uploaded files.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::domain::entities::{ContentName, FileId, UploadedFile};
use crate::domain::errors::MigrationResult;
use crate::domain::ports::PostDestinationPort;

/// Uploads each distinct locator once per run and remembers the destination id.
///
/// Nothing is persisted: a new run uploads everything again.
#[derive(Debug, Default)]
pub struct UploadRegistry {
    uploaded: HashMap<String, UploadedFile>,
}

impl UploadRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the destination id for `locator`, uploading `bytes` on first use.
    ///
    /// # Errors
    /// Returns `Upload` if the destination rejects the file.
    pub async fn upload(
        &mut self,
        destination: &dyn PostDestinationPort,
        locator: &str,
        bytes: Bytes,
    ) -> MigrationResult<FileId> {
        if let Some(existing) = self.uploaded.get(locator) {
            trace!(locator, file_id = %existing.destination_id, "Reusing uploaded file");
            return Ok(existing.destination_id.clone());
        }

        let name = ContentName::from_locator(locator);
        let size = bytes.len();
        let destination_id = destination.upload_file(&name, bytes).await?;

        debug!(locator, name = %name, size, file_id = %destination_id, "Uploaded file");

        self.uploaded.insert(
            locator.to_string(),
            UploadedFile {
                name,
                destination_id: destination_id.clone(),
            },
        );
        Ok(destination_id)
    }

    /// Returns the upload recorded for `locator`.
    #[must_use]
    pub fn get(&self, locator: &str) -> Option<&UploadedFile> {
        self.uploaded.get(locator)
    }

    /// Number of files uploaded this run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.uploaded.len()
    }

    /// Returns true if nothing was uploaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::MigrationError;
    use crate::domain::ports::mocks::MockPostDestination;

    #[tokio::test]
    async fn test_upload_uses_content_name() {
        let destination = MockPostDestination::new();
        let mut registry = UploadRegistry::new();

        let id = registry
            .upload(&destination, "https://host/a.png", Bytes::from_static(b"a"))
            .await
            .unwrap();

        let uploads = destination.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, ContentName::from_locator("https://host/a.png"));
        assert_eq!(registry.get("https://host/a.png").unwrap().destination_id, id);
    }

    #[tokio::test]
    async fn test_same_locator_uploaded_once() {
        let destination = MockPostDestination::new();
        let mut registry = UploadRegistry::new();

        let first = registry
            .upload(&destination, "https://host/a.png", Bytes::from_static(b"a"))
            .await
            .unwrap();
        let second = registry
            .upload(&destination, "https://host/a.png", Bytes::from_static(b"a"))
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(destination.uploads().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_failure_not_recorded() {
        let destination = MockPostDestination::new().failing_uploads();
        let mut registry = UploadRegistry::new();

        let result = registry
            .upload(&destination, "https://host/a.png", Bytes::from_static(b"a"))
            .await;

        assert!(matches!(result, Err(MigrationError::Upload { .. })));
        assert!(registry.is_empty());
    }
}
