use align::AlignConfig;
use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Similarity at or above which two different spellings count as the same
/// word.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.8;

/// Configuration for word matching and discrepancy classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiffConfig {
    /// Threshold in `[0.0, 1.0]` for [`WordMatch::is_match`](crate::WordMatch).
    pub match_threshold: f64,
    /// Report every non-identical pair inside a replace block as
    /// [`Discrepancy::Incorrect`](crate::Discrepancy), including pairs that
    /// still match under `match_threshold`.
    ///
    /// A reciter who drops a single letter usually wants to hear about it, so
    /// this is on by default. Turn it off to tolerate transcription noise.
    pub report_near_matches: bool,
    pub align: AlignConfig,
}

impl DiffConfig {
    pub fn validate(&self) -> Result<(), DiffError> {
        if !self.match_threshold.is_finite() || !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(DiffError::InvalidConfig(
                "match_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            report_near_matches: true,
            align: AlignConfig::default(),
        }
    }
}
