use align::char_ratio;
use normalize::Normalizer;
use once_cell::sync::Lazy;

use crate::config::DEFAULT_MATCH_THRESHOLD;
use crate::error::DiffError;
use crate::types::WordMatch;

static DEFAULT_MATCHER: Lazy<WordMatcher> = Lazy::new(WordMatcher::default);

/// Compare two words with the default normalizer and threshold.
pub fn words_match(a: &str, b: &str) -> WordMatch {
    DEFAULT_MATCHER.compare(a, b)
}

/// Tolerant word comparison.
///
/// Inputs are normalized before comparing, so raw fragments are fine too.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    normalizer: Normalizer,
    threshold: f64,
}

impl WordMatcher {
    pub fn new(normalizer: Normalizer, threshold: f64) -> Result<Self, DiffError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(DiffError::InvalidConfig(format!(
                "match threshold {threshold} outside [0, 1]"
            )));
        }
        Ok(Self {
            normalizer,
            threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn compare(&self, a: &str, b: &str) -> WordMatch {
        let a = self.normalizer.normalize_str(a);
        let b = self.normalizer.normalize_str(b);
        if a == b {
            return WordMatch {
                is_match: true,
                similarity: 1.0,
            };
        }
        let similarity = char_ratio(&a, &b);
        WordMatch {
            is_match: similarity >= self.threshold,
            similarity,
        }
    }
}

impl Default for WordMatcher {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::default(),
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}
