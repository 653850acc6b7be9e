//! Misskey API client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::{CreateNoteResponse, DriveFileResponse, ErrorResponse};
use crate::domain::entities::{ApiToken, ContentName, FileId, PostId, PostPayload};
use crate::domain::errors::{MigrationError, MigrationResult};
use crate::domain::ports::PostDestinationPort;
use crate::infrastructure::http_client::{build_client, describe_transport_error};

/// Field carrying the access token in Misskey request bodies.
const TOKEN_FIELD: &str = "i";

/// Uploads drive files and creates notes on one Misskey server.
pub struct MisskeyClient {
    client: Client,
    base_url: String,
    token: ApiToken,
}

impl MisskeyClient {
    /// Creates client for `https://{server}`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(server: &str, token: ApiToken, timeout: Duration) -> Result<Self, reqwest::Error> {
        let server = server.trim().trim_end_matches('/');
        let origin = if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("https://{server}")
        };
        Self::with_base_url(format!("{origin}/api"), token, timeout)
    }

    /// Creates client with custom API base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: ApiToken,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout, HeaderMap::new())?,
            base_url: base_url.into(),
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn note_body(&self, payload: &PostPayload) -> Value {
        let mut body = payload.as_map().clone();
        body.insert(
            TOKEN_FIELD.to_string(),
            Value::String(self.token.as_str().to_string()),
        );
        Value::Object(body)
    }

    async fn error_message(status: StatusCode, response: reqwest::Response) -> String {
        match response.json::<ErrorResponse>().await {
            Ok(body) => match body.error.code {
                Some(code) => format!("HTTP {status} - {} ({code})", body.error.message),
                None => format!("HTTP {status} - {}", body.error.message),
            },
            Err(_) => format!("HTTP {status}"),
        }
    }
}

#[async_trait]
impl PostDestinationPort for MisskeyClient {
    async fn upload_file(&self, name: &ContentName, bytes: Bytes) -> MigrationResult<FileId> {
        debug!(name = %name, size = bytes.len(), "Uploading drive file");

        let form = Form::new()
            .text(TOKEN_FIELD, self.token.as_str().to_string())
            .text("name", name.as_str().to_string())
            .part(
                "file",
                Part::bytes(bytes.to_vec()).file_name(name.as_str().to_string()),
            );

        let response = self
            .client
            .post(self.endpoint("drive/files/create"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Misskey");
                MigrationError::upload(name.as_str(), describe_transport_error(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MigrationError::upload(
                name.as_str(),
                Self::error_message(status, response).await,
            ));
        }

        let file: DriveFileResponse = response.json().await.map_err(|e| {
            MigrationError::upload(name.as_str(), format!("failed to parse response: {e}"))
        })?;

        Ok(FileId::new(file.id))
    }

    async fn create_post(&self, payload: &PostPayload) -> MigrationResult<PostId> {
        debug!(fields = payload.as_map().len(), "Creating note");

        let response = self
            .client
            .post(self.endpoint("notes/create"))
            .json(&self.note_body(payload))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach Misskey");
                MigrationError::post_creation(describe_transport_error(&e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MigrationError::post_creation(
                Self::error_message(status, response).await,
            ));
        }

        let note: CreateNoteResponse = response
            .json()
            .await
            .map_err(|e| MigrationError::post_creation(format!("failed to parse response: {e}")))?;

        Ok(PostId::new(note.created_note.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(server: &str) -> MisskeyClient {
        MisskeyClient::new(
            server,
            ApiToken::new("secret").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_from_host() {
        assert_eq!(
            client("misskey.example").endpoint("notes/create"),
            "https://misskey.example/api/notes/create"
        );
    }

    #[test]
    fn test_endpoint_from_url() {
        assert_eq!(
            client("http://localhost:3000/").endpoint("drive/files/create"),
            "http://localhost:3000/api/drive/files/create"
        );
    }

    #[test]
    fn test_note_body_adds_token() {
        let Value::Object(map) = json!({"text": "hi", "fileIds": ["a"]}) else {
            unreachable!()
        };
        let body = client("misskey.example").note_body(&PostPayload::from_map(map));

        assert_eq!(body, json!({"text": "hi", "fileIds": ["a"], "i": "secret"}));
    }
}
