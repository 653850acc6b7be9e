//! Run-scoped download cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use futures_util::future::{BoxFuture, FutureExt, Shared, try_join_all};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::domain::errors::MigrationResult;
use crate::domain::ports::FileFetcherPort;

type SharedDownload = Shared<BoxFuture<'static, MigrationResult<Bytes>>>;

/// Maps locators to downloaded bytes for the lifetime of one migration run.
///
/// A download is registered before it is first polled, so every lookup of the
/// same locator joins the same in-flight request. The lock only guards the
/// map, never the download itself.
pub struct ResourceCache {
    fetcher: Arc<dyn FileFetcherPort>,
    entries: Mutex<HashMap<String, SharedDownload>>,
    downloads: AtomicUsize,
}

impl ResourceCache {
    /// Creates an empty cache backed by `fetcher`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn FileFetcherPort>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            downloads: AtomicUsize::new(0),
        }
    }

    /// Returns the bytes for `locator`, downloading at most once per run.
    ///
    /// # Errors
    /// Returns the download error; a failed locator keeps failing for the run.
    pub async fn resolve(&self, locator: &str) -> MigrationResult<Bytes> {
        self.entry(locator).await
    }

    /// Resolves several locators together, preserving their order.
    ///
    /// # Errors
    /// Returns the first download error.
    pub async fn resolve_all<'a, I>(&self, locators: I) -> MigrationResult<Vec<Bytes>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let pending: Vec<SharedDownload> = locators
            .into_iter()
            .map(|locator| self.entry(locator))
            .collect();
        try_join_all(pending).await
    }

    /// Number of distinct locators seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been requested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of downloads started.
    #[must_use]
    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::Relaxed)
    }

    fn entry(&self, locator: &str) -> SharedDownload {
        let mut entries = self.entries.lock();

        if let Some(existing) = entries.get(locator) {
            trace!(locator, "Resource cache hit");
            return existing.clone();
        }

        debug!(locator, "Downloading resource");
        self.downloads.fetch_add(1, Ordering::Relaxed);

        let fetcher = Arc::clone(&self.fetcher);
        let key = locator.to_string();
        let download = async move { fetcher.fetch(&key).await }.boxed().shared();

        entries.insert(locator.to_string(), download.clone());
        download
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.len())
            .field("downloads", &self.downloads())
            .finish_non_exhaustive()
    }
}
