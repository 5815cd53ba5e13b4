//! Domain types and pure helpers for the notes client.
//!
//! Everything here is free of I/O: the note model and its wire shape,
//! input validation, rate-limit classification of service messages, and
//! the small formatting helpers the presentation layer relies on.

pub mod error;
pub mod presentation;
pub mod rate_limit;
pub mod types;
pub mod validation;
