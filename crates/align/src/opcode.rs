use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// What an alignment block means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpTag {
    /// Both spans hold the same elements.
    Equal,
    /// Both spans are non-empty and differ.
    Replace,
    /// Elements present only in the reference.
    Delete,
    /// Elements present only in the spoken sequence.
    Insert,
}

impl fmt::Display for OpTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OpTag::Equal => "equal",
            OpTag::Replace => "replace",
            OpTag::Delete => "delete",
            OpTag::Insert => "insert",
        };
        f.write_str(s)
    }
}

/// One alignment block: `[i1, i2)` over the spoken sequence and `[j1, j2)`
/// over the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    pub fn new(tag: OpTag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self { tag, i1, i2, j1, j2 }
    }

    pub fn spoken_range(&self) -> Range<usize> {
        self.i1..self.i2
    }

    pub fn reference_range(&self) -> Range<usize> {
        self.j1..self.j2
    }

    pub fn spoken_len(&self) -> usize {
        self.i2 - self.i1
    }

    pub fn reference_len(&self) -> usize {
        self.j2 - self.j1
    }
}
