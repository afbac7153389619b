use thiserror::Error;

/// Errors that can occur while configuring the normalizer.
///
/// Normalization itself never fails; only an invalid configuration is
/// rejected, and only at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
