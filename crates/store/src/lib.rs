//! Client-side synchronization layer for the note collection.
//!
//! - [`NotesStore`] owns the single cached copy of "all notes", fetches it
//!   on demand, and invalidates it after every successful mutation.
//! - [`CacheSlot`] is the plain state machine behind the cache.
//! - [`NotesHandle`] is what consumers hold: the current
//!   [`NotesSnapshot`], change notification, and the mutation calls.

pub mod cache;
pub mod error;
pub mod hook;
pub mod store;

pub use cache::{CacheSlot, CacheState, ALL_NOTES};
pub use error::StoreError;
pub use hook::NotesHandle;
pub use store::{NotesSnapshot, NotesStore};
