//! Sequence alignment for recitation comparison.
//!
//! [`SequenceMatcher`] finds the longest matching anchor between two
//! sequences, recurses into the gaps on either side and labels what is left
//! as [`Opcode`]s. Elements are compared atomically, so the same engine
//! aligns word tokens (for discrepancy classification) and characters (for
//! similarity ratios).
//!
//! Orientation is fixed throughout the workspace: the first sequence is what
//! was spoken, the second is the reference.
//!
//! ```rust
//! use align::{align, AlignConfig, OpTag};
//!
//! let spoken = ["بسم", "الله", "الرحيم"];
//! let reference = ["بسم", "الله", "الرحمن", "الرحيم"];
//! let ops = align(&spoken, &reference, &AlignConfig::default());
//!
//! let tags: Vec<OpTag> = ops.iter().map(|op| op.tag).collect();
//! assert_eq!(tags, vec![OpTag::Equal, OpTag::Delete, OpTag::Equal]);
//! assert_eq!(ops[1].reference_range(), 2..3);
//! ```

mod config;
mod matcher;
mod opcode;

pub use crate::config::{AlignConfig, AUTOJUNK_MIN_LEN};
pub use crate::matcher::{char_ratio, char_ratio_with, Match, SequenceMatcher};
pub use crate::opcode::{OpTag, Opcode};

use std::hash::Hash;

/// Align `spoken` against `reference` and return the opcode sequence.
///
/// The spans of the result partition `[0, spoken.len())` and
/// `[0, reference.len())` in document order.
pub fn align<T: Hash + Eq>(spoken: &[T], reference: &[T], cfg: &AlignConfig) -> Vec<Opcode> {
    SequenceMatcher::with_config(spoken, reference, cfg).opcodes()
}

/// Matching-blocks similarity ratio `2 * M / T` of two sequences.
pub fn ratio<T: Hash + Eq>(spoken: &[T], reference: &[T]) -> f64 {
    SequenceMatcher::new(spoken, reference).ratio()
}
