use diff::{Discrepancy, DiscrepancyKind};
use normalize::{ALEF, HAMZA};
use serde::{Deserialize, Serialize};

/// Count at which a category's advice switches to the stronger wording.
pub const STRONG_ADVICE_AT: usize = 3;

pub const SUCCESS_MESSAGE: &str = "Excellent recitation. No mistakes were found.";

// Hamza and every letter form that carries one, plus hamzat al-wasl.
// Classifier output is normalized, which folds every carrier onto its bare
// letter, so there only the standalone hamza and the alif-strip rule below
// can fire. The carriers matter for discrepancies built from raw words.
const HAMZA_FORMS: [char; 7] = [
    HAMZA, '\u{0623}', '\u{0625}', '\u{0622}', '\u{0624}', '\u{0626}', '\u{0671}',
];

/// Per-category counts; the only input suggestions depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub incorrect: usize,
    pub missing: usize,
    pub extra: usize,
    /// Incorrect pairs that look like hamza or alif mistakes.
    pub hamza: usize,
}

impl CategoryCounts {
    pub fn from_discrepancies(discrepancies: &[Discrepancy]) -> Self {
        let mut counts = Self::default();
        for d in discrepancies {
            match d {
                Discrepancy::Incorrect {
                    spoken_word,
                    expected_word,
                    ..
                } => {
                    counts.incorrect += 1;
                    if is_hamza_confusion(spoken_word, expected_word) {
                        counts.hamza += 1;
                    }
                }
                Discrepancy::Missing { .. } => counts.missing += 1,
                Discrepancy::Extra { .. } => counts.extra += 1,
            }
        }
        counts
    }

    pub fn get(&self, kind: DiscrepancyKind) -> usize {
        match kind {
            DiscrepancyKind::Incorrect => self.incorrect,
            DiscrepancyKind::Missing => self.missing,
            DiscrepancyKind::Extra => self.extra,
        }
    }

    pub fn total(&self) -> usize {
        self.incorrect + self.missing + self.extra
    }
}

/// True when a substitution involves a hamza form, or disappears once alif
/// and hamza are removed from both words.
pub fn is_hamza_confusion(spoken: &str, expected: &str) -> bool {
    if spoken.chars().chain(expected.chars()).any(|c| HAMZA_FORMS.contains(&c)) {
        return true;
    }
    let strip = |w: &str| -> String { w.chars().filter(|&c| c != ALEF && c != HAMZA).collect() };
    let (s, e) = (strip(spoken), strip(expected));
    !s.is_empty() && s == e
}

/// Practice suggestions for a list of discrepancies.
///
/// Empty input yields only [`SUCCESS_MESSAGE`]. Otherwise one line per
/// category present, in a fixed order: incorrect, missing, extra, hamza.
pub fn suggest(discrepancies: &[Discrepancy]) -> Vec<String> {
    suggest_from_counts(&CategoryCounts::from_discrepancies(discrepancies))
}

pub fn suggest_from_counts(counts: &CategoryCounts) -> Vec<String> {
    if counts.total() == 0 {
        return vec![SUCCESS_MESSAGE.to_owned()];
    }

    let mut out = Vec::new();
    if counts.incorrect > 0 {
        out.push(pick(
            counts.incorrect,
            "Review the words marked incorrect and recite them slowly.",
            "Several words were mispronounced. Practise this passage in shorter sections before reciting it in full.",
        ));
    }
    if counts.missing > 0 {
        out.push(pick(
            counts.missing,
            "Some words were skipped. Follow the text closely to keep your place.",
            "Many words were skipped. Revise your memorization of this passage before the next attempt.",
        ));
    }
    if counts.extra > 0 {
        out.push(pick(
            counts.extra,
            "A few words were added that are not in the text. Avoid repeating words.",
            "Many extra words were added. Recite more slowly and pause at the end of each verse.",
        ));
    }
    if counts.hamza > 0 {
        out.push(
            "Pay attention to the hamza and the alif that carries it; several mistakes involve them."
                .to_owned(),
        );
    }
    out
}

fn pick(count: usize, mild: &str, strong: &str) -> String {
    if count >= STRONG_ADVICE_AT { strong } else { mild }.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incorrect(spoken: &str, expected: &str) -> Discrepancy {
        Discrepancy::Incorrect {
            position: 0,
            spoken_word: spoken.into(),
            expected_word: expected.into(),
            similarity: 0.5,
        }
    }

    fn missing() -> Discrepancy {
        Discrepancy::Missing {
            position: 0,
            expected_word: "رب".into(),
        }
    }

    fn extra() -> Discrepancy {
        Discrepancy::Extra {
            position: 0,
            spoken_word: "امين".into(),
        }
    }

    #[test]
    fn no_discrepancies_yields_success_only() {
        assert_eq!(suggest(&[]), vec![SUCCESS_MESSAGE.to_owned()]);
    }

    #[test]
    fn categories_appear_in_fixed_order() {
        let forward = suggest(&[extra(), missing(), incorrect("قل", "هو")]);
        let backward = suggest(&[incorrect("قل", "هو"), missing(), extra()]);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 3);
        assert!(forward[0].contains("incorrect"));
        assert!(forward[1].contains("skipped"));
        assert!(forward[2].contains("added"));
    }

    #[test]
    fn strong_wording_from_three() {
        let two = suggest(&[missing(), missing()]);
        let three = suggest(&[missing(), missing(), missing()]);
        assert_ne!(two, three);
        assert!(three[0].starts_with("Many"));
    }

    #[test]
    fn hamza_confusions_detected() {
        assert!(is_hamza_confusion("سال", "سأل"));
        assert!(is_hamza_confusion("شيء", "شي"));
        assert!(is_hamza_confusion("العلمين", "العالمين"));
        assert!(!is_hamza_confusion("الصمد", "احد"));
        assert!(!is_hamza_confusion("قل", "هو"));
    }

    #[test]
    fn hamza_advice_comes_last() {
        let out = suggest(&[incorrect("العلمين", "العالمين"), extra()]);
        assert_eq!(out.len(), 3);
        assert!(out[2].contains("hamza"));
    }

    #[test]
    fn equal_counts_give_equal_suggestions() {
        let first = [
            incorrect("العلمين", "العالمين"),
            incorrect("قل", "هو"),
            missing(),
            Discrepancy::Missing {
                position: 9,
                expected_word: "الصمد".into(),
            },
        ];
        let second = [
            Discrepancy::Missing {
                position: 2,
                expected_word: "احد".into(),
            },
            incorrect("الصمت", "الصمد"),
            missing(),
            incorrect("الرحمان", "الرحمن"),
        ];
        assert_eq!(
            CategoryCounts::from_discrepancies(&first),
            CategoryCounts::from_discrepancies(&second)
        );
        assert_eq!(suggest(&first), suggest(&second));
    }

    #[test]
    fn normalized_comparisons_keep_standalone_hamza() {
        let folded = diff::compare("سأل", "سال");
        assert!(folded.is_perfect());

        let result = diff::compare("السما", "السماء");
        assert_eq!(result.discrepancies.len(), 1);
        let counts = CategoryCounts::from_discrepancies(&result.discrepancies);
        assert_eq!(counts.incorrect, 1);
        assert_eq!(counts.hamza, 1);
    }
}
