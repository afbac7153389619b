use serde::{Deserialize, Serialize};

/// One word of normalized text with its UTF-8 byte span.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Inclusive byte offset.
    pub start: usize,
    /// Exclusive byte offset.
    pub end: usize,
}

impl Token {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Split already-normalized text into word tokens.
///
/// Any Unicode whitespace separates tokens, so this is also safe on text
/// that skipped [`collapse_whitespace`](crate::collapse_whitespace); offsets
/// always index into `text` as given.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut open: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), open) {
            (true, Some(start)) => {
                tokens.push(Token {
                    text: text[start..idx].to_owned(),
                    start,
                    end: idx,
                });
                open = None;
            }
            (false, None) => open = Some(idx),
            _ => {}
        }
    }

    if let Some(start) = open {
        tokens.push(Token {
            text: text[start..].to_owned(),
            start,
            end: text.len(),
        });
    }

    tokens
}
