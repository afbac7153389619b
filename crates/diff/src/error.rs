use thiserror::Error;

/// Errors raised while configuring the comparison engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiffError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
