/// Domain-level errors raised before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required field was missing or blank after trimming.
    #[error("{0}")]
    Validation(String),
}
