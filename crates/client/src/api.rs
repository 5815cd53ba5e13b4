//! REST client for the note service's `/notes` endpoints.
//!
//! Wraps list, create, update and delete using [`reqwest`]. Non-2xx
//! responses become [`ServiceError`]s carrying the service's `error`
//! message, or a per-operation default when the body has none.

use std::time::Duration;

use async_trait::async_trait;
use notes_core::types::{ApiErrorBody, CreateNoteInput, DeleteResponse, Note, UpdateNoteInput};

use crate::config::ClientConfig;
use crate::error::{Operation, ServiceError};
use crate::service::NoteService;

/// HTTP client for a single note service.
#[derive(Debug, Clone)]
pub struct NotesApi {
    client: reqwest::Client,
    api_url: String,
}

impl NotesApi {
    /// Create a client for the service at `api_url`,
    /// e.g. `http://localhost:3000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Build a client with the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Base URL requests are issued against.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.api_url)
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/notes/{}", self.api_url, id)
    }

    // ---- private helpers ----

    /// Send a request, mapping transport failures to a network error.
    async fn send(
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ServiceError> {
        request.send().await.map_err(|e| {
            tracing::warn!(%operation, error = %e, "Note service request failed");
            ServiceError::network(operation)
        })
    }

    /// Return the response unchanged on success, or a [`ServiceError`]
    /// built from the JSON error body.
    async fn ensure_success(
        operation: Operation,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);
        let err = ServiceError::status(operation, status.as_u16(), message);

        tracing::warn!(
            %operation,
            status = status.as_u16(),
            error = %err,
            "Note service returned an error",
        );
        Err(err)
    }

    /// Check the status, then decode the JSON body into `T`.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        operation: Operation,
        response: reqwest::Response,
    ) -> Result<T, ServiceError> {
        let response = Self::ensure_success(operation, response).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::warn!(%operation, error = %e, "Failed to decode note service response");
            ServiceError::decode(operation)
        })
    }
}

#[async_trait]
impl NoteService for NotesApi {
    async fn fetch_all(&self) -> Result<Vec<Note>, ServiceError> {
        let op = Operation::Fetch;
        let response = Self::send(op, self.client.get(self.notes_url())).await?;
        let notes: Vec<Note> = Self::parse_response(op, response).await?;

        tracing::debug!(count = notes.len(), "Fetched notes");
        Ok(notes)
    }

    async fn create(&self, input: &CreateNoteInput) -> Result<Note, ServiceError> {
        let op = Operation::Create;
        let response = Self::send(op, self.client.post(self.notes_url()).json(input)).await?;
        let note: Note = Self::parse_response(op, response).await?;

        tracing::info!(note_id = %note.id, "Note created");
        Ok(note)
    }

    async fn update(&self, id: &str, input: &UpdateNoteInput) -> Result<Note, ServiceError> {
        let op = Operation::Update;
        let response = Self::send(op, self.client.put(self.note_url(id)).json(input)).await?;
        let note: Note = Self::parse_response(op, response).await?;

        tracing::info!(note_id = %note.id, "Note updated");
        Ok(note)
    }

    async fn remove(&self, id: &str) -> Result<DeleteResponse, ServiceError> {
        let op = Operation::Delete;
        let response = Self::send(op, self.client.delete(self.note_url(id))).await?;
        let deleted: DeleteResponse = Self::parse_response(op, response).await?;

        tracing::info!(note_id = %id, "Note deleted");
        Ok(deleted)
    }
}
