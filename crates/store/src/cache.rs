//! State machine for the "all notes" cache slot.
//!
//! ```text
//!            begin_fetch              complete(Ok)
//!   Empty ───────────────► Loading ───────────────► Fresh
//!     ▲                     │  ▲                     │
//!     │           complete(Err) │ begin_fetch        │ invalidate
//!     │                     ▼  │                     ▼
//!     │                   Failed ──invalidate──►  Stale
//! ```
//!
//! Invalidating while a fetch is in flight bumps the generation; the fetch
//! still lands its data but the slot ends up `Stale`, so the next read
//! fetches again.

use std::sync::Arc;

use notes_client::ServiceError;
use notes_core::types::Note;

/// Key of the single cache slot, used in log fields.
pub const ALL_NOTES: &str = "notes:all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Never fetched.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// Holds the result of the latest fetch and nothing invalidated it.
    Fresh,
    /// Invalidated; the next read fetches.
    Stale,
    /// The latest fetch failed. Only an invalidation fetches again.
    Failed,
}

/// Proof that a fetch was started, handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// The cached collection plus its fetch bookkeeping.
#[derive(Debug, Clone)]
pub struct CacheSlot {
    state: CacheState,
    notes: Arc<Vec<Note>>,
    error: Option<ServiceError>,
    has_data: bool,
    generation: u64,
}

impl Default for CacheSlot {
    fn default() -> Self {
        Self {
            state: CacheState::Empty,
            notes: Arc::new(Vec::new()),
            error: None,
            has_data: false,
            generation: 0,
        }
    }
}

impl CacheSlot {
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// The collection from the last successful fetch. The `Arc` is only
    /// replaced when a fetch succeeds.
    pub fn notes(&self) -> &Arc<Vec<Note>> {
        &self.notes
    }

    /// The failure of the most recent fetch, cleared by the next success.
    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    /// No successful fetch has landed yet and one is pending or due.
    pub fn is_loading(&self) -> bool {
        !self.has_data && matches!(self.state, CacheState::Empty | CacheState::Loading)
    }

    pub fn is_fetching(&self) -> bool {
        self.state == CacheState::Loading
    }

    pub fn is_stale(&self) -> bool {
        self.state == CacheState::Stale
    }

    /// Whether a read should start a fetch.
    pub fn needs_fetch(&self) -> bool {
        matches!(self.state, CacheState::Empty | CacheState::Stale)
    }

    /// Move to `Loading`. Returns `None` when no fetch is due, which is
    /// also the case while one is already in flight.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.needs_fetch() {
            return None;
        }
        self.state = CacheState::Loading;
        Some(FetchTicket {
            generation: self.generation,
        })
    }

    /// Record the outcome of the fetch started with `ticket`.
    ///
    /// On success the collection is replaced wholesale. On failure the
    /// previous collection is kept and the error recorded.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Note>, ServiceError>) {
        let superseded = ticket.generation != self.generation;

        match result {
            Ok(notes) => {
                self.notes = Arc::new(notes);
                self.error = None;
                self.has_data = true;
                self.state = if superseded {
                    CacheState::Stale
                } else {
                    CacheState::Fresh
                };
            }
            Err(err) => {
                self.error = Some(err);
                self.state = if superseded {
                    CacheState::Stale
                } else {
                    CacheState::Failed
                };
            }
        }
    }

    /// Mark the slot stale so the next read fetches. Does not fetch.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        if matches!(self.state, CacheState::Fresh | CacheState::Failed) {
            self.state = CacheState::Stale;
        }
    }
}
