use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of comparing two words.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordMatch {
    pub is_match: bool,
    /// Character-level similarity in `[0.0, 1.0]`; exactly 1.0 only for words
    /// that are identical after normalization.
    pub similarity: f64,
}

/// Category of a [`Discrepancy`], for counting and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    Incorrect,
    Missing,
    Extra,
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscrepancyKind::Incorrect => "incorrect",
            DiscrepancyKind::Missing => "missing",
            DiscrepancyKind::Extra => "extra",
        })
    }
}

/// One word-level deviation from the reference.
///
/// `position` always indexes the reference tokens. For [`Extra`](Self::Extra)
/// it is the reference index the surplus word was spoken before, so an extra
/// word after the last reference word sits at `reference.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Discrepancy {
    Incorrect {
        position: usize,
        spoken_word: String,
        expected_word: String,
        similarity: f64,
    },
    Missing {
        position: usize,
        expected_word: String,
    },
    Extra {
        position: usize,
        spoken_word: String,
    },
}

impl Discrepancy {
    pub fn kind(&self) -> DiscrepancyKind {
        match self {
            Discrepancy::Incorrect { .. } => DiscrepancyKind::Incorrect,
            Discrepancy::Missing { .. } => DiscrepancyKind::Missing,
            Discrepancy::Extra { .. } => DiscrepancyKind::Extra,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Discrepancy::Incorrect { position, .. }
            | Discrepancy::Missing { position, .. }
            | Discrepancy::Extra { position, .. } => *position,
        }
    }

    /// The same discrepancy with its position moved `offset` words further
    /// into the reference.
    pub fn shifted(mut self, offset: usize) -> Self {
        match &mut self {
            Discrepancy::Incorrect { position, .. }
            | Discrepancy::Missing { position, .. }
            | Discrepancy::Extra { position, .. } => *position += offset,
        }
        self
    }

    pub fn spoken_word(&self) -> Option<&str> {
        match self {
            Discrepancy::Incorrect { spoken_word, .. } | Discrepancy::Extra { spoken_word, .. } => {
                Some(spoken_word)
            }
            Discrepancy::Missing { .. } => None,
        }
    }

    pub fn expected_word(&self) -> Option<&str> {
        match self {
            Discrepancy::Incorrect { expected_word, .. }
            | Discrepancy::Missing { expected_word, .. } => Some(expected_word),
            Discrepancy::Extra { .. } => None,
        }
    }
}

/// Result of one comparison.
///
/// `overall_similarity` is the whole-string character ratio of the two
/// normalized texts and is computed independently of `discrepancies`; the two
/// can disagree slightly on the same pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub discrepancies: Vec<Discrepancy>,
    pub overall_similarity: f64,
    /// Either side was empty after normalization. Nothing was compared.
    #[serde(default)]
    pub empty_input: bool,
}

impl ComparisonResult {
    /// Result for a comparison where one side had no words.
    pub fn empty() -> Self {
        Self {
            discrepancies: Vec::new(),
            overall_similarity: 0.0,
            empty_input: true,
        }
    }

    pub fn is_perfect(&self) -> bool {
        !self.empty_input && self.discrepancies.is_empty()
    }

    pub fn count(&self, kind: DiscrepancyKind) -> usize {
        self.discrepancies.iter().filter(|d| d.kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrepancy_serializes_with_type_tag() {
        let d = Discrepancy::Missing {
            position: 3,
            expected_word: "العالمين".into(),
        };
        let json = serde_json::to_value(&d).expect("serialize");
        assert_eq!(json["type"], "missing");
        assert_eq!(json["position"], 3);
        assert_eq!(json["expected_word"], "العالمين");
    }

    #[test]
    fn shifted_moves_every_variant() {
        let ds = [
            Discrepancy::Incorrect {
                position: 0,
                spoken_word: "a".into(),
                expected_word: "b".into(),
                similarity: 0.0,
            },
            Discrepancy::Missing {
                position: 1,
                expected_word: "b".into(),
            },
            Discrepancy::Extra {
                position: 2,
                spoken_word: "a".into(),
            },
        ];
        let shifted: Vec<usize> = ds.iter().cloned().map(|d| d.shifted(10).position()).collect();
        assert_eq!(shifted, vec![10, 11, 12]);
    }
}
