//! HTTP client for the remote note service.
//!
//! [`NotesApi`] issues one request per operation against the service's
//! `/notes` resource and turns every non-success response into a
//! [`ServiceError`]. The [`NoteService`] trait is the seam the store
//! depends on, so the store can be driven by a fake in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod service;

pub use api::NotesApi;
pub use config::ClientConfig;
pub use error::{Operation, ServiceError, ServiceErrorKind};
pub use service::NoteService;
