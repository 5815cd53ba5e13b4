//! Outside-pointer-down and Escape dismissal for modal surfaces.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::document::{Document, DocumentEvent, ElementId, EventKind, ListenerId, ESCAPE_KEY};

type Callback = Box<dyn FnMut() + Send>;

/// Calls a dismissal callback when the user presses a pointer outside
/// `surface` or presses Escape anywhere.
///
/// Listeners are registered on [`attach`](Self::attach) and removed on
/// [`detach`](Self::detach) or drop. Each controller owns its listeners,
/// so several open surfaces are each dismissed once per gesture. The
/// callback is looked up at event time; replace it with
/// [`set_on_dismiss`](Self::set_on_dismiss).
///
/// The callback must not call back into its own controller.
pub struct DismissController {
    document: Arc<Document>,
    surface: ElementId,
    callback: Arc<Mutex<Callback>>,
    active: Arc<AtomicBool>,
    listeners: Vec<ListenerId>,
}

impl DismissController {
    pub fn attach<F>(document: &Arc<Document>, surface: ElementId, on_dismiss: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let callback: Arc<Mutex<Callback>> = Arc::new(Mutex::new(Box::new(on_dismiss)));
        let active = Arc::new(AtomicBool::new(true));

        let pointer = {
            let doc: Weak<Document> = Arc::downgrade(document);
            let callback = Arc::clone(&callback);
            let active = Arc::clone(&active);
            document.add_listener(EventKind::PointerDown, move |event| {
                let DocumentEvent::PointerDown { target } = event else {
                    return;
                };
                let inside = doc
                    .upgrade()
                    .is_some_and(|doc| doc.contains(surface, *target));
                if !inside {
                    fire(&active, &callback);
                }
            })
        };

        let key = {
            let callback = Arc::clone(&callback);
            let active = Arc::clone(&active);
            document.add_listener(EventKind::KeyDown, move |event| {
                if matches!(event, DocumentEvent::KeyDown { key } if key == ESCAPE_KEY) {
                    fire(&active, &callback);
                }
            })
        };

        tracing::debug!(?surface, "Dismissal listeners attached");

        Self {
            document: Arc::clone(document),
            surface,
            callback,
            active,
            listeners: vec![pointer, key],
        }
    }

    pub fn surface(&self) -> ElementId {
        self.surface
    }

    pub fn is_attached(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Replace the callback. Takes effect for the next event.
    pub fn set_on_dismiss<F>(&self, on_dismiss: F)
    where
        F: FnMut() + Send + 'static,
    {
        *self.callback.lock().unwrap_or_else(PoisonError::into_inner) = Box::new(on_dismiss);
    }

    /// Remove this controller's listeners. Safe to call more than once.
    pub fn detach(&mut self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        for id in self.listeners.drain(..) {
            self.document.remove_listener(id);
        }
        tracing::debug!(surface = ?self.surface, "Dismissal listeners detached");
    }
}

impl Drop for DismissController {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Run the current callback unless the controller was detached, which can
/// happen mid-dispatch.
fn fire(active: &AtomicBool, callback: &Mutex<Callback>) {
    if !active.load(Ordering::SeqCst) {
        return;
    }
    let mut callback = callback.lock().unwrap_or_else(PoisonError::into_inner);
    (*callback)();
}
