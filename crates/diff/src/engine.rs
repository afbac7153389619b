use align::{OpTag, Opcode, SequenceMatcher};
use normalize::{NormalizedText, Normalizer};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::DiffConfig;
use crate::error::DiffError;
use crate::types::{ComparisonResult, Discrepancy};
use crate::word::WordMatcher;

static DEFAULT_COMPARATOR: Lazy<Comparator> = Lazy::new(Comparator::default);

/// Compare raw spoken text against raw reference text with default settings.
pub fn compare(spoken: &str, reference: &str) -> ComparisonResult {
    DEFAULT_COMPARATOR.compare(spoken, reference)
}

/// Classify opcodes with default settings. See [`Comparator::classify`].
pub fn classify<A: AsRef<str>, B: AsRef<str>>(
    opcodes: &[Opcode],
    spoken: &[A],
    reference: &[B],
) -> Vec<Discrepancy> {
    DEFAULT_COMPARATOR.classify(opcodes, spoken, reference)
}

/// Alignment-based comparison engine.
///
/// Owns a normalizer and word matcher; cheap to clone and safe to share
/// across threads.
#[derive(Debug, Clone)]
pub struct Comparator {
    normalizer: Normalizer,
    matcher: WordMatcher,
    cfg: DiffConfig,
}

impl Comparator {
    pub fn new(normalizer: Normalizer, cfg: DiffConfig) -> Result<Self, DiffError> {
        cfg.validate()?;
        let matcher = WordMatcher::new(normalizer.clone(), cfg.match_threshold)?;
        Ok(Self {
            normalizer,
            matcher,
            cfg,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn config(&self) -> &DiffConfig {
        &self.cfg
    }

    /// Normalize both texts and compare them.
    pub fn compare(&self, spoken: &str, reference: &str) -> ComparisonResult {
        let spoken = self.normalizer.normalize(spoken);
        let reference = self.normalizer.normalize(reference);
        self.compare_normalized(&spoken, &reference)
    }

    pub fn compare_normalized(
        &self,
        spoken: &NormalizedText,
        reference: &NormalizedText,
    ) -> ComparisonResult {
        self.compare_tokens(&spoken.words(), &reference.words())
    }

    /// Compare two already-normalized token sequences.
    ///
    /// Positions in the result index `reference`; callers comparing against a
    /// window of a longer text shift them with [`Discrepancy::shifted`].
    pub fn compare_tokens<A: AsRef<str>, B: AsRef<str>>(
        &self,
        spoken: &[A],
        reference: &[B],
    ) -> ComparisonResult {
        if spoken.is_empty() || reference.is_empty() {
            debug!(
                spoken_words = spoken.len(),
                reference_words = reference.len(),
                "compare_empty_input"
            );
            return ComparisonResult::empty();
        }

        let spoken: Vec<&str> = spoken.iter().map(AsRef::as_ref).collect();
        let reference: Vec<&str> = reference.iter().map(AsRef::as_ref).collect();

        let opcodes = SequenceMatcher::with_config(&spoken, &reference, &self.cfg.align).opcodes();
        let discrepancies = self.classify(&opcodes, &spoken, &reference);
        let overall_similarity =
            align::char_ratio_with(&spoken.join(" "), &reference.join(" "), &self.cfg.align);

        debug!(
            spoken_words = spoken.len(),
            reference_words = reference.len(),
            opcodes = opcodes.len(),
            discrepancies = discrepancies.len(),
            overall_similarity,
            "compare_tokens"
        );

        ComparisonResult {
            discrepancies,
            overall_similarity,
            empty_input: false,
        }
    }

    /// Turn alignment opcodes into discrepancy records.
    ///
    /// Replace blocks are zipped pairwise; surplus words on either side
    /// become `Extra` / `Missing` rather than a run of misleading `Incorrect`
    /// pairs. Whitespace-only tokens are skipped.
    pub fn classify<A: AsRef<str>, B: AsRef<str>>(
        &self,
        opcodes: &[Opcode],
        spoken: &[A],
        reference: &[B],
    ) -> Vec<Discrepancy> {
        let mut out = Vec::new();

        for op in opcodes {
            match op.tag {
                OpTag::Equal => {}
                OpTag::Delete => {
                    for j in op.reference_range() {
                        push_missing(&mut out, j, reference[j].as_ref());
                    }
                }
                OpTag::Insert => {
                    for i in op.spoken_range() {
                        push_extra(&mut out, op.j1, spoken[i].as_ref());
                    }
                }
                OpTag::Replace => {
                    let paired = op.spoken_len().min(op.reference_len());
                    for k in 0..paired {
                        let said = spoken[op.i1 + k].as_ref();
                        let expected = reference[op.j1 + k].as_ref();
                        if said.trim().is_empty() || expected.trim().is_empty() {
                            continue;
                        }
                        let m = self.matcher.compare(said, expected);
                        if m.similarity >= 1.0 {
                            continue;
                        }
                        if self.cfg.report_near_matches || !m.is_match {
                            out.push(Discrepancy::Incorrect {
                                position: op.j1 + k,
                                spoken_word: said.to_owned(),
                                expected_word: expected.to_owned(),
                                similarity: m.similarity,
                            });
                        }
                    }
                    for i in (op.i1 + paired)..op.i2 {
                        push_extra(&mut out, op.j1 + paired, spoken[i].as_ref());
                    }
                    for j in (op.j1 + paired)..op.j2 {
                        push_missing(&mut out, j, reference[j].as_ref());
                    }
                }
            }
        }

        out
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::default(),
            matcher: WordMatcher::default(),
            cfg: DiffConfig::default(),
        }
    }
}

fn push_missing(out: &mut Vec<Discrepancy>, position: usize, word: &str) {
    if !word.trim().is_empty() {
        out.push(Discrepancy::Missing {
            position,
            expected_word: word.to_owned(),
        });
    }
}

fn push_extra(out: &mut Vec<Discrepancy>, position: usize, word: &str) {
    if !word.trim().is_empty() {
        out.push(Discrepancy::Extra {
            position,
            spoken_word: word.to_owned(),
        });
    }
}
