//! In-memory fake of the note service with call counters and knobs for
//! holding fetches open or failing requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use notes_client::{NoteService, Operation, ServiceError};
use notes_core::types::{CreateNoteInput, DeleteResponse, Note, UpdateNoteInput};
use tokio::sync::Semaphore;

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests, please try again later";

#[derive(Default)]
pub struct FakeNoteService {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicUsize,
    requests: AtomicUsize,
    fetches: AtomicUsize,
    fetch_gate: Mutex<Option<Arc<Semaphore>>>,
    fetch_failure: Mutex<Option<ServiceError>>,
    rate_limited: Mutex<bool>,
    undecodable_success: Mutex<bool>,
}

impl FakeNoteService {
    pub fn seeded() -> Arc<Self> {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let service = Self::default();
        *service.notes.lock().unwrap() = vec![
            Note {
                id: "1".into(),
                title: "Test Note 1".into(),
                content: "This is test content 1".into(),
                tags: vec!["test".into(), "example".into()],
                created_at: ts,
                updated_at: ts,
            },
            Note {
                id: "2".into(),
                title: "Test Note 2".into(),
                content: "This is test content 2".into(),
                tags: vec!["work".into()],
                created_at: ts,
                updated_at: ts,
            },
        ];
        service.next_id.store(3, Ordering::SeqCst);
        Arc::new(service)
    }

    /// Total requests received, of any kind.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// `fetch_all` calls received.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Make every following fetch wait for a permit on the returned gate.
    pub fn hold_fetches(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.fetch_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn fail_fetches_with(&self, err: Option<ServiceError>) {
        *self.fetch_failure.lock().unwrap() = err;
    }

    /// Answer every request with the service's 429 rejection.
    pub fn set_rate_limited(&self, limited: bool) {
        *self.rate_limited.lock().unwrap() = limited;
    }

    /// Apply mutations but answer them with a success body that cannot be
    /// decoded.
    pub fn set_undecodable_success(&self, enabled: bool) {
        *self.undecodable_success.lock().unwrap() = enabled;
    }

    fn answer<T>(&self, operation: Operation, value: T) -> Result<T, ServiceError> {
        if *self.undecodable_success.lock().unwrap() {
            return Err(ServiceError::decode(operation));
        }
        Ok(value)
    }

    fn begin(&self, operation: Operation) -> Result<(), ServiceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if *self.rate_limited.lock().unwrap() {
            return Err(ServiceError::status(
                operation,
                429,
                Some(RATE_LIMIT_MESSAGE.into()),
            ));
        }
        Ok(())
    }

    fn not_found(operation: Operation) -> ServiceError {
        ServiceError::status(operation, 404, Some("Note not found".into()))
    }
}

#[async_trait]
impl NoteService for FakeNoteService {
    async fn fetch_all(&self) -> Result<Vec<Note>, ServiceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.begin(Operation::Fetch)?;

        let gate = self.fetch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await;
        }

        if let Some(err) = self.fetch_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn create(&self, input: &CreateNoteInput) -> Result<Note, ServiceError> {
        self.begin(Operation::Create)?;

        let now = Utc::now();
        let note = Note {
            id: self.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
            title: input.title.clone(),
            content: input.content.clone(),
            tags: input.tags.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.notes.lock().unwrap().push(note.clone());
        self.answer(Operation::Create, note)
    }

    async fn update(&self, id: &str, input: &UpdateNoteInput) -> Result<Note, ServiceError> {
        self.begin(Operation::Update)?;

        let updated = {
            let mut notes = self.notes.lock().unwrap();
            let note = notes
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| Self::not_found(Operation::Update))?;
            // Fields missing from the body keep their current value.
            note.title = input.title.clone();
            note.content = input.content.clone();
            if let Some(tags) = &input.tags {
                note.tags = tags.clone();
            }
            note.updated_at = Utc::now();
            note.clone()
        };
        self.answer(Operation::Update, updated)
    }

    async fn remove(&self, id: &str) -> Result<DeleteResponse, ServiceError> {
        self.begin(Operation::Delete)?;

        {
            let mut notes = self.notes.lock().unwrap();
            let before = notes.len();
            notes.retain(|n| n.id != id);
            if notes.len() == before {
                return Err(Self::not_found(Operation::Delete));
            }
        }
        self.answer(
            Operation::Delete,
            DeleteResponse {
                message: "Note deleted successfully".into(),
            },
        )
    }
}
