use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::hash_normalized_bytes;
use crate::token::{tokenize, Token};

/// Output of the normalization pipeline.
///
/// `text` is already in canonical form: single-space separated, trimmed, NFC,
/// free of combining marks. `tokens` index into `text` by byte offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    pub tokens: Vec<Token>,
    /// Version-aware SHA-256 of `text`, hex encoded.
    pub digest: String,
    /// Normalization config version that produced `text`.
    pub version: u32,
}

impl NormalizedText {
    /// Wrap text that has already been through the pipeline.
    pub fn new(text: String, version: u32) -> Self {
        let tokens = tokenize(&text);
        let digest = hash_normalized_bytes(version, text.as_bytes());
        Self {
            text,
            tokens,
            digest,
            version,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn into_words(self) -> Vec<String> {
        self.tokens.into_iter().map(|t| t.text).collect()
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_keeps_offsets() {
        let text = NormalizedText::new("قل هو".to_owned(), 1);
        let json = serde_json::to_string(&text).expect("serialize");
        let back: NormalizedText = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, text);
        assert_eq!(back.tokens[1].start, "قل ".len());
    }

    #[test]
    fn into_words_preserves_order() {
        let text = NormalizedText::new("الله الصمد".to_owned(), 1);
        assert_eq!(text.to_string(), "الله الصمد");
        assert_eq!(text.into_words(), vec!["الله".to_owned(), "الصمد".to_owned()]);
    }
}
