//! Word matching and discrepancy classification.
//!
//! Given a spoken text and its reference, the [`Comparator`] normalizes both,
//! aligns them word by word and reports each deviation as a typed
//! [`Discrepancy`]. Alongside the discrete list it reports a continuous
//! whole-string similarity, so callers get both a score and the specifics.
//!
//! ```rust
//! use diff::{compare, Discrepancy};
//!
//! let result = compare("الحمد للة رب العلمين", "الحمد لله رب العالمين");
//! assert_eq!(result.discrepancies.len(), 1);
//! assert!(matches!(
//!     &result.discrepancies[0],
//!     Discrepancy::Incorrect { position: 3, expected_word, .. } if expected_word == "العالمين"
//! ));
//! assert!(result.overall_similarity > 0.8 && result.overall_similarity < 1.0);
//! ```

mod config;
mod engine;
mod error;
mod types;
mod word;

pub use crate::config::{DiffConfig, DEFAULT_MATCH_THRESHOLD};
pub use crate::engine::{classify, compare, Comparator};
pub use crate::error::DiffError;
pub use crate::types::{ComparisonResult, Discrepancy, DiscrepancyKind, WordMatch};
pub use crate::word::{words_match, WordMatcher};
