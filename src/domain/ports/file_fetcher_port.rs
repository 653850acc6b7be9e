//! File fetcher port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::MigrationResult;

/// Port for downloading referenced resources.
#[async_trait]
pub trait FileFetcherPort: Send + Sync {
    /// Downloads `locator` to raw bytes.
    async fn fetch(&self, locator: &str) -> MigrationResult<Bytes>;
}
