//! Configuration types for the normalization pipeline.
//!
//! [`NormalizeConfig`] controls the optional stages of the pipeline. The
//! mandatory stages (mark stripping, equivalence mapping, tatweel removal,
//! whitespace collapsing) always run.
//!
//! # Versioning
//!
//! The `version` field is part of every [`NormalizedText`](crate::NormalizedText)
//! digest. Any change to normalization behavior must come with a version bump
//! so cached reference texts from an older build are recognizably stale.
//!
//! # Examples
//!
//! ```rust
//! use normalize::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.compatibility_decomposition);
//! assert!(config.strip_verse_numbers);
//! assert!(!config.strip_punctuation);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// Configuration for the normalization pipeline.
///
/// Cheap to clone and serde-friendly so it can be embedded in a larger
/// YAML or JSON configuration file:
///
/// ```json
/// {
///   "version": 1,
///   "compatibility_decomposition": true,
///   "strip_verse_numbers": true,
///   "strip_quranic_marks": true,
///   "strip_punctuation": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    pub version: u32,

    /// Decompose with NFKD instead of NFD.
    ///
    /// Compatibility decomposition also folds Arabic presentation forms
    /// (isolated/final letter shapes, lam-alef ligatures, `ﷲ`) back to their
    /// base letters, which transcription engines emit surprisingly often.
    pub compatibility_decomposition: bool,

    /// Remove parenthesized verse numbers such as `(12)` or `﴿١٢﴾` and any
    /// remaining standalone digit runs.
    pub strip_verse_numbers: bool,

    /// Remove Quranic annotation signs that are not combining marks
    /// (end-of-ayah `۝`, rub el hizb `۞`, place of sajdah `۩`).
    pub strip_quranic_marks: bool,

    /// Treat Unicode punctuation as whitespace.
    ///
    /// Off by default: the reference corpus carries no punctuation and
    /// transcription punctuation is rare enough to be reported as extra
    /// tokens instead of silently discarded.
    pub strip_punctuation: bool,
}

impl NormalizeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.version == 0 {
            return Err(NormalizeError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            compatibility_decomposition: true,
            strip_verse_numbers: true,
            strip_quranic_marks: true,
            strip_punctuation: false,
        }
    }
}
