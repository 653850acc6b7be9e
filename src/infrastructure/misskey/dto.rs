use serde::Deserialize;

/// Drive file returned by `drive/files/create`.
#[derive(Debug, Deserialize)]
pub struct DriveFileResponse {
    /// File id.
    pub id: String,
}

/// Response of `notes/create`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    /// The created note.
    pub created_note: NoteResponse,
}

/// A note.
#[derive(Debug, Deserialize)]
pub struct NoteResponse {
    /// Note id.
    pub id: String,
}

/// Misskey API error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetail,
}

/// Misskey API error details.
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable message.
    pub message: String,
    /// Machine-readable code.
    #[serde(default)]
    pub code: Option<String>,
}
