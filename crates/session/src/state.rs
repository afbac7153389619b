use chrono::{DateTime, Duration, Utc};
use diff::Discrepancy;
use normalize::{NormalizedText, Normalizer};
use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No reference text loaded.
    Uninitialized,
    /// Reference loaded, nothing spoken yet.
    Ready,
    InProgress,
    /// The cursor reached the end of the reference. Not locking: further
    /// chunks are still accepted and recorded as extra words.
    Complete,
}

/// What the reciter should say next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "words", rename_all = "snake_case")]
pub enum Hint {
    Words(Vec<String>),
    EndOfText,
}

impl Hint {
    pub fn words(&self) -> &[String] {
        match self {
            Hint::Words(words) => words,
            Hint::EndOfText => &[],
        }
    }

    pub fn is_end_of_text(&self) -> bool {
        matches!(self, Hint::EndOfText)
    }
}

/// Per-session progress through a reference text.
///
/// One value per recitation session, owned by whoever serializes calls for
/// that session. All mutation goes through
/// [`SessionTracker`](crate::SessionTracker), which either commits a whole
/// chunk or leaves the state untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Reference words consumed so far. Grows by exactly the normalized word
    /// count of each chunk and may run past `total_reference_words`.
    pub cursor_position: usize,
    pub total_reference_words: usize,
    pub accumulated_discrepancies: Vec<Discrepancy>,
    /// Normalized reference, cached so it is not re-normalized per chunk.
    pub reference: Option<NormalizedText>,
    pub started_at: Option<DateTime<Utc>>,
}

impl ProgressState {
    /// A session with no reference text.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub(crate) fn with_reference(reference: NormalizedText) -> Self {
        Self {
            cursor_position: 0,
            total_reference_words: reference.word_count(),
            accumulated_discrepancies: Vec::new(),
            reference: Some(reference),
            started_at: Some(Utc::now()),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.reference {
            None => SessionPhase::Uninitialized,
            Some(_) if self.cursor_position >= self.total_reference_words => {
                SessionPhase::Complete
            }
            Some(_) if self.cursor_position == 0 => SessionPhase::Ready,
            Some(_) => SessionPhase::InProgress,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == SessionPhase::Complete
    }

    /// Spoken words consumed so far. Equal to the cursor: every spoken word
    /// moves it forward by one.
    pub fn spoken_words(&self) -> usize {
        self.cursor_position
    }

    /// `min(cursor / total * 100, 100)`. An empty reference counts as fully
    /// recited; an uninitialized session as not started.
    pub fn progress_percentage(&self) -> f64 {
        if self.reference.is_none() {
            return 0.0;
        }
        if self.total_reference_words == 0 {
            return 100.0;
        }
        (self.cursor_position as f64 / self.total_reference_words as f64 * 100.0).min(100.0)
    }

    /// The next `n` reference words from the cursor, or
    /// [`Hint::EndOfText`] once the cursor reached the end.
    pub fn next_expected_words(&self, n: usize) -> Hint {
        let Some(reference) = &self.reference else {
            return Hint::EndOfText;
        };
        if self.cursor_position >= reference.tokens.len() {
            return Hint::EndOfText;
        }
        let end = (self.cursor_position + n).min(reference.tokens.len());
        Hint::Words(
            reference.tokens[self.cursor_position..end]
                .iter()
                .map(|t| t.text.clone())
                .collect(),
        )
    }

    /// Rewind to the start of the same reference. The start time is kept.
    pub fn reset(&mut self) {
        self.cursor_position = 0;
        self.accumulated_discrepancies.clear();
    }

    /// True when `raw_reference` normalizes to the cached reference. A
    /// stored session whose reference changed since it was saved is stale.
    pub fn matches_reference(&self, raw_reference: &str, normalizer: &Normalizer) -> bool {
        match &self.reference {
            Some(cached) => cached.digest == normalizer.normalize(raw_reference).digest,
            None => false,
        }
    }

    /// Time since the session started, if it has.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|at| Utc::now() - at)
    }
}

/// What one committed chunk changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Discrepancies found in this chunk only, at absolute reference positions.
    pub discrepancies: Vec<Discrepancy>,
    pub cursor_position: usize,
    pub hint: Hint,
    pub progress_percentage: f64,
    pub phase: SessionPhase,
}

impl ProgressUpdate {
    pub(crate) fn snapshot(
        state: &ProgressState,
        discrepancies: Vec<Discrepancy>,
        hint_words: usize,
    ) -> Self {
        Self {
            discrepancies,
            cursor_position: state.cursor_position,
            hint: state.next_expected_words(hint_words),
            progress_percentage: state.progress_percentage(),
            phase: state.phase(),
        }
    }
}
