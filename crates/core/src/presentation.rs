//! Display helpers shared by every consumer that renders notes or errors.

use crate::rate_limit::{classify_message, ErrorClass};
use crate::types::Timestamp;

/// Heading shown above rate-limit notices.
pub const RATE_LIMIT_HEADING: &str = "Rate Limit Exceeded";

/// Prefix used when a rate-limit message is folded into a single line.
pub const RATE_LIMIT_PREFIX: &str = "Rate limit exceeded: ";

pub const LOADING_NOTES: &str = "Loading notes...";
pub const NO_NOTES_FOUND: &str = "No notes found.";

pub const CREATE_FALLBACK: &str = "Failed to create note. Please try again.";
pub const UPDATE_FALLBACK: &str = "Failed to update note. Please try again.";
pub const DELETE_FALLBACK: &str = "Failed to delete note";

/// Content longer than this many characters is shown collapsed.
pub const COLLAPSE_THRESHOLD: usize = 200;

/// Number of trailing id characters shown on a note card.
const SHORT_ID_LEN: usize = 8;

/// A failure message prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub class: ErrorClass,
    pub message: String,
}

impl ErrorNotice {
    /// Classify `message` for display. An empty message is replaced by
    /// `fallback`.
    pub fn from_message(message: &str, fallback: &str) -> Self {
        let message = if message.is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        };

        Self {
            class: classify_message(&message),
            message,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.class == ErrorClass::RateLimited
    }

    /// Distinct heading for rate-limit notices, `None` otherwise.
    pub fn heading(&self) -> Option<&'static str> {
        self.is_rate_limited().then_some(RATE_LIMIT_HEADING)
    }

    /// Single-line form, prefixed when rate limited.
    pub fn one_line(&self) -> String {
        if self.is_rate_limited() {
            format!("{RATE_LIMIT_PREFIX}{}", self.message)
        } else {
            self.message.clone()
        }
    }
}

/// The last eight characters of a note id.
pub fn short_id(id: &str) -> &str {
    let count = id.chars().count();
    if count <= SHORT_ID_LEN {
        return id;
    }
    let start = id
        .char_indices()
        .nth(count - SHORT_ID_LEN)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &id[start..]
}

/// Format a timestamp as e.g. `Jan 1, 2024, 12:00 AM` (UTC).
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Whether content is long enough to be collapsed behind "Read more".
pub fn needs_expansion(content: &str) -> bool {
    content.chars().count() > COLLAPSE_THRESHOLD
}
