use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    /// The session has no reference text to compare against.
    #[error("invalid session state: {0}")]
    InvalidSessionState(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("session store error: {0}")]
    Store(String),
}
