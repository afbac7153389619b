use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_categories::UnicodeCategories;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::equivalence::{CharacterEquivalenceTable, TATWEEL};
use crate::error::NormalizeError;
use crate::text::NormalizedText;
use crate::whitespace::collapse_whitespace;

// Opening/closing brackets around a verse number: ASCII parens and the
// ornate parentheses used by printed mushafs.
static VERSE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[(\x{FD3E}\x{FD3F}]\s*\d+\s*[)\x{FD3E}\x{FD3F}]").expect("verse number pattern")
});

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit run pattern"));

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Normalize with the default configuration.
pub fn normalize(input: &str) -> NormalizedText {
    DEFAULT_NORMALIZER.normalize(input)
}

/// Normalize with the default configuration, returning only the text.
pub fn normalize_str(input: &str) -> String {
    DEFAULT_NORMALIZER.normalize_str(input)
}

/// True when `ch` is a combining character: any Unicode mark, or any code
/// point with a non-zero canonical combining class.
#[inline]
pub fn is_combining(ch: char) -> bool {
    ch.is_mark() || canonical_combining_class(ch) != 0
}

// End of ayah, rub el hizb, place of sajdah.
#[inline]
fn is_quranic_sign(ch: char) -> bool {
    matches!(ch, '\u{06DD}' | '\u{06DE}' | '\u{06E9}')
}

/// A validated, reusable normalization pipeline.
#[derive(Debug, Clone)]
pub struct Normalizer {
    cfg: NormalizeConfig,
    table: &'static CharacterEquivalenceTable,
}

impl Normalizer {
    pub fn new(cfg: NormalizeConfig) -> Result<Self, NormalizeError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            table: CharacterEquivalenceTable::standard(),
        })
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.cfg
    }

    /// Run the full pipeline and tokenize the result.
    pub fn normalize(&self, input: &str) -> NormalizedText {
        NormalizedText::new(self.normalize_str(input), self.cfg.version)
    }

    /// Run the full pipeline. Total over any input.
    pub fn normalize_str(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }

        // Decomposition first: it can split one code point into base + marks.
        let decomposed: String = if self.cfg.compatibility_decomposition {
            input.nfkd().collect()
        } else {
            input.nfd().collect()
        };

        let mut folded = String::with_capacity(decomposed.len());
        for ch in decomposed.chars() {
            if is_combining(ch) {
                continue;
            }
            let ch = self.table.canonical(ch);
            if ch == TATWEEL {
                continue;
            }
            if self.cfg.strip_quranic_marks && is_quranic_sign(ch) {
                folded.push(' ');
                continue;
            }
            folded.push(ch);
        }

        // Replaced by a space, not removed, so "الرحيم(1)الحمد" stays two words.
        let numbered: Cow<'_, str> = if self.cfg.strip_verse_numbers {
            let without_markers = VERSE_NUMBER.replace_all(&folded, " ");
            Cow::Owned(DIGIT_RUN.replace_all(&without_markers, " ").into_owned())
        } else {
            Cow::Borrowed(folded.as_str())
        };

        let punctuated: Cow<'_, str> = if self.cfg.strip_punctuation {
            Cow::Owned(
                numbered
                    .chars()
                    .map(|ch| if ch.is_punctuation() { ' ' } else { ch })
                    .collect(),
            )
        } else {
            numbered
        };

        collapse_whitespace(&punctuated).nfc().collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            cfg: NormalizeConfig::default(),
            table: CharacterEquivalenceTable::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_forms_fold_under_compatibility_decomposition() {
        // Isolated/final shapes and the lam-alef ligature.
        assert_eq!(normalize_str("\u{FEEA}\u{FEFB}"), "هلا");
        assert_eq!(normalize_str("\u{FDF2}"), "الله");
    }

    #[test]
    fn canonical_decomposition_keeps_presentation_forms() {
        let normalizer = Normalizer::new(NormalizeConfig {
            compatibility_decomposition: false,
            ..Default::default()
        })
        .expect("valid config");
        assert_eq!(normalizer.normalize_str("\u{FDF2}"), "\u{FDF2}");
        assert_eq!(normalizer.normalize_str("أَحَد"), "احد");
    }

    #[test]
    fn punctuation_stripping_is_opt_in() {
        assert_eq!(normalize_str("قل، هو"), "قل، هو");

        let normalizer = Normalizer::new(NormalizeConfig {
            strip_punctuation: true,
            ..Default::default()
        })
        .expect("valid config");
        assert_eq!(normalizer.normalize_str("قل، هو. الله"), "قل هو الله");
    }

    #[test]
    fn digits_glued_to_words_split_them() {
        assert_eq!(normalize_str("الرحيم(1)الحمد"), "الرحيم الحمد");
        assert_eq!(normalize_str("رب2العالمين"), "رب العالمين");
    }

    #[test]
    fn combining_detection() {
        assert!(is_combining('\u{064E}')); // fatha
        assert!(is_combining('\u{0670}')); // superscript alef
        assert!(is_combining('\u{06D6}')); // small high ligature
        assert!(!is_combining('ب'));
        assert!(!is_combining(TATWEEL));
    }
}
