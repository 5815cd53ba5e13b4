//! The synchronization store.
//!
//! [`NotesStore`] is created once per client session and shared as
//! `Arc<NotesStore<S>>`. Reads never fail: fetch errors are recorded in
//! the snapshot. Mutations go straight to the service and, on success,
//! only invalidate the cache; the collection is never patched locally.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use notes_client::{NoteService, ServiceError};
use notes_core::types::{CreateNoteInput, Note, UpdateNoteInput};
use notes_core::validation::{normalize_note_input, normalize_update_input};
use tokio::sync::watch;

use crate::cache::{CacheSlot, FetchTicket, ALL_NOTES};
use crate::error::StoreError;

/// Observable state of the store at one point in time.
#[derive(Debug, Clone)]
pub struct NotesSnapshot {
    /// Last fetched collection, in service order. Shared, never mutated.
    pub notes: Arc<Vec<Note>>,
    /// No collection has been received yet and one is pending.
    pub is_loading: bool,
    /// A fetch is in flight (initial or refresh). Kept current, but a change
    /// in this flag alone does not notify subscribers.
    pub is_fetching: bool,
    /// The cache was invalidated; the next read fetches. Becoming stale
    /// notifies, clearing it when the refetch starts does not.
    pub is_stale: bool,
    pub last_error: Option<ServiceError>,
    pub show_create_note: bool,
}

impl NotesSnapshot {
    /// Whether moving from `previous` to `self` should wake subscribers.
    /// Collections compare by reference. Starting a fetch alone does not
    /// count.
    fn differs_from(&self, previous: &Self) -> bool {
        !Arc::ptr_eq(&self.notes, &previous.notes)
            || self.is_loading != previous.is_loading
            || (self.is_stale && !previous.is_stale)
            || self.last_error != previous.last_error
            || self.show_create_note != previous.show_create_note
    }
}

#[derive(Debug, Default)]
struct StoreState {
    slot: CacheSlot,
    show_create_note: bool,
}

impl StoreState {
    fn snapshot(&self) -> NotesSnapshot {
        NotesSnapshot {
            notes: Arc::clone(self.slot.notes()),
            is_loading: self.slot.is_loading(),
            is_fetching: self.slot.is_fetching(),
            is_stale: self.slot.is_stale(),
            last_error: self.slot.error().cloned(),
            show_create_note: self.show_create_note,
        }
    }
}

/// Single source of truth for the note collection.
pub struct NotesStore<S: NoteService> {
    service: Arc<S>,
    state: Mutex<StoreState>,
    snapshot_tx: watch::Sender<NotesSnapshot>,
    /// Whether a fetch is in flight. Drives [`NotesStore::load`].
    fetching_tx: watch::Sender<bool>,
}

impl<S: NoteService> NotesStore<S> {
    /// Create the store. Nothing is fetched until the first read.
    pub fn new(service: S) -> Arc<Self> {
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<S>) -> Arc<Self> {
        let state = StoreState::default();
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        let (fetching_tx, _) = watch::channel(false);

        Arc::new(Self {
            service,
            state: Mutex::new(state),
            snapshot_tx,
            fetching_tx,
        })
    }

    /// The current snapshot, without triggering a fetch.
    pub fn snapshot(&self) -> NotesSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Receive a new value whenever the observable snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<NotesSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Read the collection.
    ///
    /// Starts a background fetch when the cache is empty or stale and none
    /// is already in flight, then returns immediately.
    ///
    /// # Panics
    ///
    /// Panics if a fetch is needed and the caller is not inside a Tokio
    /// runtime, as the fetch is run with [`tokio::spawn`].
    pub fn list(self: &Arc<Self>) -> NotesSnapshot {
        let (ticket, snapshot) = {
            let mut state = self.lock();
            let ticket = state.slot.begin_fetch();
            (ticket, self.publish(&state))
        };

        if let Some(ticket) = ticket {
            tracing::debug!(key = ALL_NOTES, "Cache miss, fetching notes");
            let store = Arc::clone(self);
            tokio::spawn(async move { store.run_fetch(ticket).await });
        }

        snapshot
    }

    /// Like [`list`](Self::list), but waits until no fetch is in flight.
    ///
    /// # Panics
    ///
    /// Same as [`list`](Self::list).
    pub async fn load(self: &Arc<Self>) -> NotesSnapshot {
        let mut rx = self.fetching_tx.subscribe();
        self.list();

        if rx.wait_for(|fetching| !*fetching).await.is_err() {
            tracing::debug!(key = ALL_NOTES, "Fetch channel closed while waiting");
        }
        self.snapshot()
    }

    /// Invalidate and read again. Recovers a slot whose last fetch failed.
    ///
    /// # Panics
    ///
    /// Same as [`list`](Self::list).
    pub fn refresh(self: &Arc<Self>) -> NotesSnapshot {
        self.invalidate();
        self.list()
    }

    /// Mark the collection stale without fetching.
    pub fn invalidate(&self) {
        let mut state = self.lock();
        state.slot.invalidate();
        tracing::debug!(key = ALL_NOTES, state = ?state.slot.state(), "Cache invalidated");
        self.publish(&state);
    }

    /// Validate and create a note. On success the cache is invalidated.
    ///
    /// A 2xx answer whose body cannot be decoded still invalidates, since
    /// the note was created, but is returned as an error.
    pub async fn create(&self, input: &CreateNoteInput) -> Result<Note, StoreError> {
        let input = normalize_note_input(input)?;
        let result = self.service.create(&input).await;
        self.settle(&result);
        result.map_err(StoreError::from)
    }

    /// Validate and replace a note's editable fields. Tags are always
    /// sent, so an input without tags clears them.
    pub async fn update(&self, id: &str, input: &UpdateNoteInput) -> Result<Note, StoreError> {
        let input = normalize_update_input(input)?;
        let result = self.service.update(id, &input).await;
        self.settle(&result);
        result.map_err(StoreError::from)
    }

    /// Delete a note. On success the cache is invalidated.
    ///
    /// The confirmation body is not needed, so a 2xx that cannot be
    /// decoded counts as success.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = self.service.remove(id).await;
        self.settle(&result);
        match result {
            Ok(_) => Ok(()),
            Err(err) if err.is_undecodable_success() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Toggle the create form. No network effect.
    pub fn set_show_create_note(&self, visible: bool) {
        let mut state = self.lock();
        state.show_create_note = visible;
        self.publish(&state);
    }

    // ---- private helpers ----

    /// Invalidate after any mutation the service applied.
    fn settle<T>(&self, result: &Result<T, ServiceError>) {
        match result {
            Ok(_) => self.invalidate(),
            Err(err) if err.is_undecodable_success() => {
                tracing::warn!(
                    operation = %err.operation,
                    "Mutation applied but response was unreadable",
                );
                self.invalidate();
            }
            Err(_) => {}
        }
    }

    async fn run_fetch(&self, ticket: FetchTicket) {
        let result = self.service.fetch_all().await;

        let mut state = self.lock();
        match &result {
            Ok(notes) => tracing::info!(key = ALL_NOTES, count = notes.len(), "Notes loaded"),
            Err(e) => tracing::warn!(key = ALL_NOTES, error = %e, "Failed to load notes"),
        }
        state.slot.complete(ticket, result);
        self.publish(&state);
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store the snapshot of `state` and notify subscribers if it differs
    /// observably from the last one. Called with the state lock held so
    /// updates stay ordered.
    fn publish(&self, state: &StoreState) -> NotesSnapshot {
        let next = state.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            let changed = next.differs_from(current);
            *current = next.clone();
            changed
        });
        self.fetching_tx.send_if_modified(|fetching| {
            let changed = *fetching != next.is_fetching;
            *fetching = next.is_fetching;
            changed
        });
        next
    }
}
