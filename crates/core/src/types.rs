//! Note model and request/response payloads as they appear on the wire.

use serde::{Deserialize, Serialize};

/// Service-assigned note identifier. Opaque to the client.
pub type NoteId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A titled, tagged text record owned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Absent on the wire decodes as empty.
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Editable fields of a note, sent as the body of `POST /notes` and
/// `PUT /notes/{id}`.
///
/// `tags` is omitted from the JSON body when `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Body of a create request.
pub type CreateNoteInput = NoteInput;

/// Body of an update request. Updates replace every editable field, so
/// the store always sends `tags` on this path (see
/// [`normalize_update_input`](crate::validation::normalize_update_input)).
pub type UpdateNoteInput = NoteInput;

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: None,
        }
    }

    /// Attach tags. An empty list is stored as `None` so the field is
    /// left out of the request body.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.tags = if tags.is_empty() { None } else { Some(tags) };
        self
    }
}

/// Success body of `DELETE /notes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Error body the service returns with non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
