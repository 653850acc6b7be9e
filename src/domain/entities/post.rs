//! Destination post types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ContentName;

/// Payload key holding the post text.
pub const TEXT_KEY: &str = "text";

/// Payload key holding the ordered attachment ids.
pub const FILE_IDS_KEY: &str = "fileIds";

/// Opaque id of a file stored on the destination platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    /// Creates a new `FileId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque id of a created post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    /// Creates a new `PostId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image reference found in a comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentReference {
    /// Literal text matched in the body.
    pub matched_text: String,
    /// Referenced URL.
    pub locator: String,
}

impl AttachmentReference {
    /// Creates a new reference.
    #[must_use]
    pub fn new(matched_text: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            matched_text: matched_text.into(),
            locator: locator.into(),
        }
    }
}

/// A file uploaded to the destination during the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Content-derived name sent with the upload.
    pub name: ContentName,
    /// Id returned by the destination.
    pub destination_id: FileId,
}

/// Per-comment post field overrides parsed from a leading directive block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives(Map<String, Value>);

impl Directives {
    /// Wraps a decoded JSON object.
    #[must_use]
    pub const fn new(options: Map<String, Value>) -> Self {
        Self(options)
    }

    /// Returns true when no overrides were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the override for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the decoded options.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the directives and returns the inner map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Body of a destination create-post request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostPayload(Map<String, Value>);

impl PostPayload {
    /// Wraps a fully composed field map.
    #[must_use]
    pub const fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the post text, if it is a string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.0.get(TEXT_KEY).and_then(Value::as_str)
    }

    /// Returns the attachment ids, or `None` when the field is absent.
    #[must_use]
    pub fn file_ids(&self) -> Option<Vec<&str>> {
        self.0
            .get(FILE_IDS_KEY)
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).collect())
    }

    /// Returns the raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true when the payload carries `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the field map.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
