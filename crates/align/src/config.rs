use serde::{Deserialize, Serialize};

/// Reference length at which the popular-element heuristic kicks in.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// Alignment options.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlignConfig {
    /// Ignore "popular" reference elements (more than 1% of a reference of
    /// at least [`AUTOJUNK_MIN_LEN`] elements) when searching for anchors.
    ///
    /// Speeds up alignment against whole passages at the cost of never
    /// anchoring on very frequent words such as `الله` or `من`. Off by
    /// default.
    pub autojunk: bool,
}
