use async_trait::async_trait;
use notes_core::types::{CreateNoteInput, DeleteResponse, Note, UpdateNoteInput};

use crate::error::ServiceError;

/// Operations the remote note service supports.
///
/// Each call maps to exactly one request; implementations never retry.
#[async_trait]
pub trait NoteService: Send + Sync + 'static {
    /// `GET /notes`
    async fn fetch_all(&self) -> Result<Vec<Note>, ServiceError>;

    /// `POST /notes`
    async fn create(&self, input: &CreateNoteInput) -> Result<Note, ServiceError>;

    /// `PUT /notes/{id}`
    async fn update(&self, id: &str, input: &UpdateNoteInput) -> Result<Note, ServiceError>;

    /// `DELETE /notes/{id}`
    async fn remove(&self, id: &str) -> Result<DeleteResponse, ServiceError>;
}
