//! A minimal document: an element tree and document-wide listeners.
//!
//! [`Document`] is shared as `Arc<Document>`. Listeners are called
//! outside the internal lock, so a listener may add or remove listeners
//! (including itself) while an event is being dispatched.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// `key` value of an Escape key press.
pub const ESCAPE_KEY: &str = "Escape";

/// Identifier of an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

/// Identifier of a registered listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// An input event delivered at document level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Pointer pressed on `target`.
    PointerDown { target: ElementId },
    /// Key pressed; `key` follows DOM naming (`"Escape"`, `"a"`, ...).
    KeyDown { key: String },
}

impl DocumentEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DocumentEvent::PointerDown { .. } => EventKind::PointerDown,
            DocumentEvent::KeyDown { .. } => EventKind::KeyDown,
        }
    }

    pub fn escape() -> Self {
        DocumentEvent::KeyDown {
            key: ESCAPE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    KeyDown,
}

type Listener = Arc<dyn Fn(&DocumentEvent) + Send + Sync>;

#[derive(Default)]
struct DocumentInner {
    next_id: u64,
    /// Element -> parent.
    elements: HashMap<ElementId, Option<ElementId>>,
    listeners: BTreeMap<ListenerId, (EventKind, Listener)>,
}

impl DocumentInner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct Document {
    inner: Mutex<DocumentInner>,
}

impl Document {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Add an element under `parent` (or at the root).
    pub fn create_element(&self, parent: Option<ElementId>) -> ElementId {
        let mut inner = self.lock();
        let id = ElementId(inner.next_id());
        inner.elements.insert(id, parent);
        id
    }

    /// Remove `id` and every element beneath it.
    pub fn remove_element(&self, id: ElementId) {
        let mut inner = self.lock();
        let doomed: Vec<ElementId> = inner
            .elements
            .keys()
            .copied()
            .filter(|&e| is_within(&inner.elements, id, e))
            .collect();
        for e in doomed {
            inner.elements.remove(&e);
        }
    }

    /// Whether `node` is `ancestor` itself or one of its descendants.
    /// Elements no longer in the document are contained by nothing.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let inner = self.lock();
        inner.elements.contains_key(&ancestor) && is_within(&inner.elements, ancestor, node)
    }

    /// Register a document-wide listener for events of `kind`.
    pub fn add_listener<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&DocumentEvent) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = ListenerId(inner.next_id());
        inner.listeners.insert(id, (kind, Arc::new(listener)));
        tracing::trace!(listener = id.0, ?kind, "Listener added");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self.lock().listeners.remove(&id).is_some();
        if removed {
            tracing::trace!(listener = id.0, "Listener removed");
        }
        removed
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Deliver `event` to every listener registered for its kind, in
    /// registration order. Returns how many listeners were called.
    pub fn dispatch(&self, event: &DocumentEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .lock()
            .listeners
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in &targets {
            listener(event);
        }
        targets.len()
    }

    fn lock(&self) -> MutexGuard<'_, DocumentInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Walk up from `node` looking for `ancestor`.
fn is_within(
    elements: &HashMap<ElementId, Option<ElementId>>,
    ancestor: ElementId,
    node: ElementId,
) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = elements.get(&id).copied().flatten();
    }
    false
}
