use notes_client::ServiceError;
use notes_core::error::CoreError;
use notes_core::presentation::ErrorNotice;
use notes_core::rate_limit::{classify_message, ErrorClass};

/// Failure of a store mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The service call failed. Passed through unchanged.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl StoreError {
    pub fn class(&self) -> ErrorClass {
        classify_message(&self.to_string())
    }

    pub fn is_rate_limited(&self) -> bool {
        self.class() == ErrorClass::RateLimited
    }

    /// The service answered 404 for the addressed note.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::Service(err) => err.is_not_found(),
            StoreError::Validation(_) => false,
        }
    }

    /// Prepare the failure for display, using `fallback` if the message
    /// is empty.
    pub fn notice(&self, fallback: &str) -> ErrorNotice {
        ErrorNotice::from_message(&self.to_string(), fallback)
    }
}
