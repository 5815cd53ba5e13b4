//! In-process fake of the note service, served by axum on an ephemeral
//! port so the real `reqwest` client can be exercised end to end.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use notes_core::types::Note;
use serde_json::{json, Value};

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later";

/// How the fake answers every request, regardless of route.
#[derive(Debug, Clone, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// `429` with the service's rate-limit body.
    RateLimited,
    /// The given status with a non-JSON body.
    PlainTextFailure(u16),
    /// `200` with a body that is not JSON.
    MalformedSuccess,
}

#[derive(Debug, Default)]
struct Inner {
    notes: Vec<Note>,
    next_id: u64,
    mode: Mode,
    requests: usize,
}

/// Shared handle to the fake's state.
#[derive(Clone, Default)]
pub struct FakeService {
    inner: Arc<Mutex<Inner>>,
}

impl FakeService {
    pub fn seeded() -> Self {
        let service = Self::default();
        {
            let mut inner = service.inner.lock().unwrap();
            inner.notes = vec![
                sample_note("1", "Test Note 1", "This is test content 1", &["test", "example"]),
                sample_note("2", "Test Note 2", "This is test content 2", &["work"]),
            ];
            inner.next_id = 3;
        }
        service
    }

    pub fn set_mode(&self, mode: Mode) {
        self.inner.lock().unwrap().mode = mode;
    }

    pub fn requests(&self) -> usize {
        self.inner.lock().unwrap().requests
    }

    pub fn notes(&self) -> Vec<Note> {
        self.inner.lock().unwrap().notes.clone()
    }

    /// Serve the fake and return its `/api` base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/notes", get(list_notes).post(create_note))
            .route("/api/notes/{id}", put(update_note).delete(delete_note))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake service");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake service");
        });

        format!("http://{addr}/api")
    }

    /// Count the request and short-circuit it when a failure mode is set.
    fn begin(&self) -> Option<Response> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests += 1;
        match inner.mode {
            Mode::Normal => None,
            Mode::RateLimited => Some(
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": RATE_LIMIT_MESSAGE })),
                )
                    .into_response(),
            ),
            Mode::PlainTextFailure(code) => Some(
                (
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    "boom",
                )
                    .into_response(),
            ),
            Mode::MalformedSuccess => Some((StatusCode::OK, "not json").into_response()),
        }
    }
}

pub fn sample_note(id: &str, title: &str, content: &str, tags: &[&str]) -> Note {
    let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: ts,
        updated_at: ts,
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn tags_field(body: &Value) -> Option<Vec<String>> {
    body.get("tags").and_then(Value::as_array).map(|tags| {
        tags.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

async fn list_notes(State(service): State<FakeService>) -> Response {
    if let Some(rejection) = service.begin() {
        return rejection;
    }
    Json(service.notes()).into_response()
}

async fn create_note(State(service): State<FakeService>, Json(body): Json<Value>) -> Response {
    if let Some(rejection) = service.begin() {
        return rejection;
    }

    let (Some(title), Some(content)) = (string_field(&body, "title"), string_field(&body, "content"))
    else {
        return error(StatusCode::BAD_REQUEST, "Title and content are required");
    };

    let mut inner = service.inner.lock().unwrap();
    let now = Utc::now();
    let note = Note {
        id: inner.next_id.to_string(),
        title,
        content,
        tags: tags_field(&body).unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };
    inner.next_id += 1;
    inner.notes.push(note.clone());

    (StatusCode::CREATED, Json(note)).into_response()
}

async fn update_note(
    State(service): State<FakeService>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(rejection) = service.begin() {
        return rejection;
    }

    let title = string_field(&body, "title");
    let content = string_field(&body, "content");
    let tags = tags_field(&body);
    if title.is_none() && content.is_none() && tags.is_none() {
        return error(StatusCode::BAD_REQUEST, "At least one field must be provided");
    }

    let mut inner = service.inner.lock().unwrap();
    let Some(note) = inner.notes.iter_mut().find(|n| n.id == id) else {
        return error(StatusCode::NOT_FOUND, "Note not found");
    };
    if let Some(title) = title {
        note.title = title;
    }
    if let Some(content) = content {
        note.content = content;
    }
    if let Some(tags) = tags {
        note.tags = tags;
    }
    note.updated_at = Utc::now();

    Json(note.clone()).into_response()
}

async fn delete_note(State(service): State<FakeService>, Path(id): Path<String>) -> Response {
    if let Some(rejection) = service.begin() {
        return rejection;
    }

    let mut inner = service.inner.lock().unwrap();
    let before = inner.notes.len();
    inner.notes.retain(|n| n.id != id);
    if inner.notes.len() == before {
        return error(StatusCode::NOT_FOUND, "Note not found");
    }

    Json(json!({ "message": "Note deleted successfully" })).into_response()
}
