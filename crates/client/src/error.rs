//! Failure type shared by every note service call.

use std::fmt;

use notes_core::rate_limit::{classify_message, ErrorClass};

/// The service call a failure came from. Picks the fallback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when the service gives no usable `error` field, or
    /// when no response arrived at all.
    pub fn default_message(self) -> &'static str {
        match self {
            Operation::Fetch => "Unable to fetch notes",
            Operation::Create => "Unable to create note",
            Operation::Update => "Unable to update note",
            Operation::Delete => "Unable to delete note",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// What went wrong underneath a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The service answered with a non-2xx status.
    Status(u16),
    /// No response was received (connect, DNS, TLS, timeout).
    Network,
    /// A success response whose body could not be decoded.
    Decode,
}

/// A failed note service call.
///
/// `message` is the service's own `error` text when it provided one and is
/// kept verbatim, since rate limiting is only recognisable from it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub operation: Operation,
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn status(operation: Operation, status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| operation.default_message().to_string());
        Self {
            operation,
            kind: ServiceErrorKind::Status(status),
            message,
        }
    }

    pub fn network(operation: Operation) -> Self {
        Self {
            operation,
            kind: ServiceErrorKind::Network,
            message: operation.default_message().to_string(),
        }
    }

    pub fn decode(operation: Operation) -> Self {
        Self {
            operation,
            kind: ServiceErrorKind::Decode,
            message: operation.default_message().to_string(),
        }
    }

    /// HTTP status, if a response was received.
    pub fn http_status(&self) -> Option<u16> {
        match self.kind {
            ServiceErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }

    /// The service reported that the addressed note does not exist.
    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }

    /// The service answered 2xx but the body could not be decoded. Any
    /// change the request carried has already been applied.
    pub fn is_undecodable_success(&self) -> bool {
        self.kind == ServiceErrorKind::Decode
    }

    pub fn class(&self) -> ErrorClass {
        classify_message(&self.message)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.class() == ErrorClass::RateLimited
    }
}
