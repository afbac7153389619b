//! Tasmee normalization layer.
//!
//! This crate turns raw Arabic text (a transcription, a typed recitation or a
//! reference verse) into a deterministic, comparable token stream. Everything
//! downstream (word matching, alignment, session tracking) consumes its output.
//!
//! ## What we do
//!
//! 1. Unicode decomposition (compatibility by default) so diacritics become
//!    separate code points and presentation forms fall back to base letters
//! 2. Drop every combining mark (tashkeel, Quranic annotation marks)
//! 3. Map letter variants through the [`CharacterEquivalenceTable`]
//!    (hamza-bearing alif forms, hamzat al-wasl, alif maksura, ta marbuta,
//!    Farsi look-alikes)
//! 4. Strip tatweel
//! 5. Remove verse-number annotations such as `(12)` and any stray digit runs
//! 6. Collapse whitespace, trim edges
//! 7. Recompose (NFC)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. The pipeline is total over arbitrary Unicode
//! input: unknown characters pass through untouched and empty input yields an
//! empty [`NormalizedText`].
//!
//! ## Invariants worth knowing
//!
//! - `normalize(normalize(x)) == normalize(x)`
//! - The output never contains a combining mark
//! - Tokens are separated by exactly one ASCII space
//! - Digest = SHA-256(version || 0x00 || text)
//!
//! ```rust
//! use normalize::normalize;
//!
//! let a = normalize("بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ (1)");
//! let b = normalize("بسم الله الرحمن الرحيم");
//! assert_eq!(a.text, b.text);
//! assert_eq!(a.words(), vec!["بسم", "الله", "الرحمن", "الرحيم"]);
//! ```

mod config;
mod equivalence;
mod error;
mod hash;
mod pipeline;
mod text;
mod token;
mod whitespace;

pub use crate::config::NormalizeConfig;
pub use crate::equivalence::{
    CharacterEquivalenceTable, EquivalenceClass, ALEF, EQUIVALENCE_CLASSES, HAMZA, TATWEEL,
};
pub use crate::error::NormalizeError;
pub use crate::hash::{hash_normalized_bytes, hash_text};
pub use crate::pipeline::{is_combining, normalize, normalize_str, Normalizer};
pub use crate::text::NormalizedText;
pub use crate::token::{tokenize, Token};
pub use crate::whitespace::collapse_whitespace;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize_default() {
        let out = normalize("  الْحَمْدُ   لِلَّهِ\nرَبِّ الْعَالَمِينَ  ");

        assert_eq!(out.text, "الحمد لله رب العالمين");
        assert_eq!(out.version, NormalizeConfig::default().version);
        assert_eq!(out.word_count(), 4);

        let expected_hash = hash_normalized_bytes(out.version, out.text.as_bytes());
        assert_eq!(out.digest, expected_hash);
    }

    #[test]
    fn alif_forms_collapse_to_bare_alif() {
        let forms = ["أ", "إ", "آ", "ٱ", "ا"];
        for form in forms {
            assert_eq!(normalize_str(form), "ا", "form {form:?} did not collapse");
        }
    }

    #[test]
    fn ta_marbuta_and_alif_maksura_collapse() {
        assert_eq!(normalize_str("ة"), normalize_str("ه"));
        assert_eq!(normalize_str("رحمة"), "رحمه");
        assert_eq!(normalize_str("على"), "علي");
    }

    #[test]
    fn farsi_look_alikes_collapse() {
        assert_eq!(normalize_str("ی"), "ي");
        assert_eq!(normalize_str("ک"), "ك");
        assert_eq!(normalize_str("ە"), "ه");
    }

    #[test]
    fn tatweel_is_removed() {
        assert_eq!(normalize_str("الرحمـــن"), "الرحمن");
    }

    #[test]
    fn verse_numbers_are_removed() {
        assert_eq!(
            normalize_str("الرحيم(1) الحمد لله ( 2 ) رب"),
            "الرحيم الحمد لله رب"
        );
        assert_eq!(normalize_str("العالمين ﴿٢﴾"), "العالمين");
        assert_eq!(normalize_str("آية 12 ثم ١٣"), "ايه ثم");
    }

    #[test]
    fn verse_end_sign_is_removed() {
        assert_eq!(normalize_str("الرحيم ۝١ الحمد"), "الرحيم الحمد");
        assert_eq!(normalize_str("۞ وإذ"), "واذ");
    }

    #[test]
    fn empty_and_whitespace_input_yield_empty_text() {
        for input in ["", "   ", "\n\t", "(1)", "ـــ"] {
            let out = normalize(input);
            assert!(out.is_empty(), "{input:?} should normalize to empty");
            assert!(out.tokens.is_empty());
        }
    }

    #[test]
    fn disable_verse_number_stripping() {
        let normalizer = Normalizer::new(NormalizeConfig {
            strip_verse_numbers: false,
            ..Default::default()
        })
        .expect("valid config");
        assert_eq!(normalizer.normalize_str("رب (2)"), "رب (2)");
    }

    #[test]
    fn invalid_config_version_rejected() {
        let res = Normalizer::new(NormalizeConfig {
            version: 0,
            ..Default::default()
        });
        assert!(matches!(res, Err(NormalizeError::InvalidConfig(_))));
    }

    #[test]
    fn digest_includes_version() {
        let v1 = Normalizer::default();
        let v2 = Normalizer::new(NormalizeConfig {
            version: 2,
            ..Default::default()
        })
        .expect("valid config");

        let a = v1.normalize("رب العالمين");
        let b = v2.normalize("رب العالمين");
        assert_eq!(a.text, b.text);
        assert_ne!(a.digest, b.digest);
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(normalize_str("hello \u{1F600} world"), "hello \u{1F600} world");
    }
}
