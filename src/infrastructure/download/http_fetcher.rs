//! HTTP attachment downloader.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, trace, warn};

use crate::domain::entities::ApiToken;
use crate::domain::errors::{MigrationError, MigrationResult};
use crate::domain::ports::FileFetcherPort;
use crate::infrastructure::http_client::{build_client, describe_transport_error};

/// Downloads attachments, authenticating only against the source tracker.
///
/// The token is sent when the locator has the same scheme, host and port as
/// the trusted origin. Every other host is fetched anonymously.
pub struct HttpFileFetcher {
    client: Client,
    trusted_origin: Url,
    token: Option<ApiToken>,
}

impl HttpFileFetcher {
    /// Creates a fetcher trusting `trusted_origin` with `token`.
    ///
    /// # Errors
    /// Returns error if `trusted_origin` is not a URL or the client cannot be built.
    pub fn new(
        trusted_origin: &str,
        token: Option<ApiToken>,
        timeout: Duration,
    ) -> Result<Self, HttpFileFetcherError> {
        let trusted_origin = Url::parse(trusted_origin)
            .map_err(|_| HttpFileFetcherError::InvalidOrigin(trusted_origin.to_string()))?;

        Ok(Self {
            client: build_client(timeout, HeaderMap::new())?,
            trusted_origin,
            token,
        })
    }

    /// Returns the `Authorization` value for `url`, if it may receive one.
    fn credential_for(&self, url: &Url) -> Option<HeaderValue> {
        let token = self.token.as_ref()?;
        if !is_same_origin(url, &self.trusted_origin) {
            trace!(host = url.host_str().unwrap_or_default(), "Third-party host, no credential");
            return None;
        }
        let mut value = HeaderValue::from_str(&token.bearer()).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

/// Errors creating an [`HttpFileFetcher`].
#[derive(Debug, thiserror::Error)]
pub enum HttpFileFetcherError {
    /// Trusted origin is not a URL.
    #[error("invalid source origin '{0}'")]
    InvalidOrigin(String),
    /// HTTP client construction failed.
    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Compares scheme, host and port. Opaque origins never match.
#[must_use]
pub fn is_same_origin(url: &Url, trusted: &Url) -> bool {
    let origin = url.origin();
    origin.is_tuple() && origin == trusted.origin()
}

#[async_trait]
impl FileFetcherPort for HttpFileFetcher {
    async fn fetch(&self, locator: &str) -> MigrationResult<Bytes> {
        let url = Url::parse(locator)
            .map_err(|e| MigrationError::download(locator, format!("invalid URL: {e}")))?;

        let mut request = self.client.get(url.clone());
        if let Some(credential) = self.credential_for(&url) {
            debug!(locator, "Downloading with source credential");
            request = request.header(header::AUTHORIZATION, credential);
        }

        let response = request.send().await.map_err(|e| {
            warn!(locator, error = %e, "Download failed");
            MigrationError::download(locator, describe_transport_error(&e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(locator, status = status.as_u16(), "Download rejected");
            return Err(MigrationError::download_status(locator, status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MigrationError::download(locator, format!("failed to read body: {e}")))?;

        debug!(locator, size = bytes.len(), "Downloaded resource");
        Ok(bytes)
    }
}
