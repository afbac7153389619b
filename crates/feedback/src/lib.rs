//! Reports and practice suggestions.
//!
//! Everything here is a pure function of discrepancy counts: the same
//! per-category statistics always yield the same report and the same
//! ordered suggestions.

mod report;
mod suggest;

pub use crate::report::{summarize, summarize_comparison, Report};
pub use crate::suggest::{
    is_hamza_confusion, suggest, suggest_from_counts, CategoryCounts, STRONG_ADVICE_AT,
    SUCCESS_MESSAGE,
};
