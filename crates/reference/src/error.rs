use thiserror::Error;

/// Failures surfaced by a [`ReferenceProvider`](crate::ReferenceProvider).
///
/// The core never retries: every variant means "no reference text
/// available" to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReferenceError {
    #[error("passage {0} not found")]
    NotFound(u32),
    #[error("reference provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed reference payload: {0}")]
    Malformed(String),
}
