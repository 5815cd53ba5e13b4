//! Document-level input events and dismissal of modal surfaces.
//!
//! - [`Document`]: element tree plus a registry of document-wide
//!   listeners that [`Document::dispatch`] fans events out to.
//! - [`DismissController`]: closes a surface on a pointer-down outside it
//!   or on Escape, for as long as the controller is alive.

pub mod dismiss;
pub mod document;

pub use dismiss::DismissController;
pub use document::{Document, DocumentEvent, ElementId, EventKind, ListenerId, ESCAPE_KEY};
