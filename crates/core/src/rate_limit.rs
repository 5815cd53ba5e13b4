//! Rate-limit detection for service error messages.
//!
//! The service only reports failures as free text, so rate limiting is
//! recognised by substring. All callers go through [`classify_message`].

/// Markers the service uses in rate-limit rejections.
const RATE_LIMIT_MARKERS: &[&str] = &["Too many", "rate limit"];

/// Coarse class of a failure message, used to pick its presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    RateLimited,
    General,
}

/// Classify a service error message. Matching is case-sensitive.
pub fn classify_message(message: &str) -> ErrorClass {
    if RATE_LIMIT_MARKERS.iter().any(|m| message.contains(m)) {
        ErrorClass::RateLimited
    } else {
        ErrorClass::General
    }
}

/// Shorthand for `classify_message(message) == ErrorClass::RateLimited`.
pub fn is_rate_limited(message: &str) -> bool {
    classify_message(message) == ErrorClass::RateLimited
}
