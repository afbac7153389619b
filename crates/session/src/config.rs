use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Hint sizes for the progress tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Words returned by [`ProgressState::next_expected_words`](crate::ProgressState)
    /// when a caller asks for a hint outside of streaming.
    pub hint_words: usize,
    /// Words attached to every [`ProgressUpdate`](crate::ProgressUpdate).
    pub streaming_hint_words: usize,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.hint_words == 0 || self.streaming_hint_words == 0 {
            return Err(SessionError::InvalidConfig(
                "hint sizes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hint_words: 5,
            streaming_hint_words: 3,
        }
    }
}
