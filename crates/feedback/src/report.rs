use diff::{ComparisonResult, Discrepancy};
use serde::{Deserialize, Serialize};

use crate::suggest::{suggest_from_counts, CategoryCounts};

/// Final report for a recitation. Percentages carry one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub accuracy: f64,
    pub completion: f64,
    pub total_words: usize,
    pub spoken_words: usize,
    pub incorrect: usize,
    pub missing: usize,
    pub extra: usize,
    pub total_errors: usize,
    /// Errors per hundred reference words. Can exceed 100 when many extra
    /// words were spoken.
    pub error_rate: f64,
    pub suggestions: Vec<String>,
}

/// Aggregate a session's discrepancies.
///
/// Accuracy is the share of reference words recited correctly:
/// `(total - incorrect - missing) / total`, clamped to `[0, 100]`.
pub fn summarize(
    discrepancies: &[Discrepancy],
    total_words: usize,
    spoken_words: usize,
) -> Report {
    let counts = CategoryCounts::from_discrepancies(discrepancies);
    let correct = total_words.saturating_sub(counts.incorrect + counts.missing);
    build(counts, percent(correct, total_words).min(100.0), total_words, spoken_words)
}

/// Aggregate a one-shot comparison. Accuracy is the holistic similarity
/// `round(overall_similarity * 100, 1)`.
pub fn summarize_comparison(
    result: &ComparisonResult,
    total_words: usize,
    spoken_words: usize,
) -> Report {
    let counts = CategoryCounts::from_discrepancies(&result.discrepancies);
    build(counts, result.overall_similarity * 100.0, total_words, spoken_words)
}

fn build(counts: CategoryCounts, accuracy: f64, total_words: usize, spoken_words: usize) -> Report {
    Report {
        accuracy: round1(accuracy),
        completion: round1(percent(spoken_words, total_words).min(100.0)),
        total_words,
        spoken_words,
        incorrect: counts.incorrect,
        missing: counts.missing,
        extra: counts.extra,
        total_errors: counts.total(),
        error_rate: round1(percent(counts.total(), total_words)),
        suggestions: suggest_from_counts(&counts),
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
