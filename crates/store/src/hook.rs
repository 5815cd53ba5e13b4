//! Consumer-side access to the store.
//!
//! A [`NotesHandle`] pairs the shared store with a private change
//! receiver. It holds no state of its own: reads come from the store's
//! latest snapshot and mutations are forwarded unchanged.

use std::sync::Arc;

use notes_client::{NoteService, ServiceError};
use notes_core::types::{CreateNoteInput, Note, UpdateNoteInput};
use tokio::sync::watch;

use crate::error::StoreError;
use crate::store::{NotesSnapshot, NotesStore};

pub struct NotesHandle<S: NoteService> {
    store: Arc<NotesStore<S>>,
    rx: watch::Receiver<NotesSnapshot>,
}

impl<S: NoteService> Clone for NotesHandle<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            rx: self.rx.clone(),
        }
    }
}

impl<S: NoteService> NotesHandle<S> {
    pub fn new(store: &Arc<NotesStore<S>>) -> Self {
        Self {
            store: Arc::clone(store),
            rx: store.subscribe(),
        }
    }

    /// Latest snapshot. Marks it as seen for [`changed`](Self::changed).
    pub fn snapshot(&mut self) -> NotesSnapshot {
        self.rx.borrow_and_update().clone()
    }

    pub fn notes(&self) -> Arc<Vec<Note>> {
        Arc::clone(&self.rx.borrow().notes)
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_loading
    }

    pub fn fetch_error(&self) -> Option<ServiceError> {
        self.rx.borrow().last_error.clone()
    }

    pub fn show_create_note(&self) -> bool {
        self.rx.borrow().show_create_note
    }

    /// Wait until the observable snapshot differs from the last one seen.
    ///
    /// Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Must be called inside a Tokio runtime; see [`NotesStore::list`].
    pub fn list(&self) -> NotesSnapshot {
        self.store.list()
    }

    pub async fn load(&self) -> NotesSnapshot {
        self.store.load().await
    }

    pub fn refresh(&self) -> NotesSnapshot {
        self.store.refresh()
    }

    pub async fn create_note(&self, input: &CreateNoteInput) -> Result<Note, StoreError> {
        self.store.create(input).await
    }

    pub async fn update_note(&self, id: &str, input: &UpdateNoteInput) -> Result<Note, StoreError> {
        self.store.update(id, input).await
    }

    pub async fn delete_note(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id).await
    }

    pub fn set_show_create_note(&self, visible: bool) {
        self.store.set_show_create_note(visible);
    }
}

impl<S: NoteService> NotesStore<S> {
    /// A consumer handle onto this store.
    pub fn handle(self: &Arc<Self>) -> NotesHandle<S> {
        NotesHandle::new(self)
    }
}
