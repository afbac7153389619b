use std::time::Instant;

use diff::{Comparator, Discrepancy};
use normalize::NormalizedText;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::state::{Hint, ProgressState, ProgressUpdate};

/// Drives [`ProgressState`] values through a streaming recitation.
///
/// Each chunk is compared against the reference window that starts at the
/// cursor and is as long as the chunk, not against the whole remaining
/// text. The cursor then moves forward by the chunk's word count whether or
/// not the words were right, so a misrecognized word never stalls a session.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    comparator: Comparator,
    cfg: SessionConfig,
}

impl SessionTracker {
    pub fn new(comparator: Comparator, cfg: SessionConfig) -> Result<Self, SessionError> {
        cfg.validate()?;
        Ok(Self { comparator, cfg })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.cfg
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Normalize `reference` and open a session at cursor 0.
    pub fn start(&self, reference: &str) -> ProgressState {
        self.start_normalized(self.comparator.normalizer().normalize(reference))
    }

    pub fn start_normalized(&self, reference: NormalizedText) -> ProgressState {
        ProgressState::with_reference(reference)
    }

    /// The default-size hint for `state`.
    pub fn hint(&self, state: &ProgressState) -> Hint {
        state.next_expected_words(self.cfg.hint_words)
    }

    /// Compare one spoken chunk at the cursor and commit the result.
    ///
    /// On error `state` is unchanged. An empty chunk is a no-op.
    pub fn advance(
        &self,
        state: &mut ProgressState,
        chunk: &str,
    ) -> Result<ProgressUpdate, SessionError> {
        let start = Instant::now();

        let Some(reference) = state.reference.as_ref() else {
            warn!(
                elapsed_micros = start.elapsed().as_micros(),
                "advance_rejected"
            );
            return Err(SessionError::InvalidSessionState(
                "no reference text loaded".into(),
            ));
        };

        let chunk = self.comparator.normalizer().normalize(chunk);
        let spoken = chunk.words();
        if spoken.is_empty() {
            return Ok(ProgressUpdate::snapshot(
                state,
                Vec::new(),
                self.cfg.streaming_hint_words,
            ));
        }

        let cursor = state.cursor_position;
        let total = reference.word_count();
        let discrepancies: Vec<Discrepancy> = if cursor >= total {
            spoken
                .iter()
                .map(|word| Discrepancy::Extra {
                    position: total,
                    spoken_word: (*word).to_owned(),
                })
                .collect()
        } else {
            let end = (cursor + spoken.len()).min(total);
            let reference_words = reference.words();
            self.comparator
                .compare_tokens(&spoken, &reference_words[cursor..end])
                .discrepancies
                .into_iter()
                .map(|d| d.shifted(cursor))
                .collect()
        };

        state
            .accumulated_discrepancies
            .extend(discrepancies.iter().cloned());
        state.cursor_position = cursor + spoken.len();

        info!(
            chunk_words = spoken.len(),
            cursor = state.cursor_position,
            reference_words = total,
            discrepancies = discrepancies.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "advance_success"
        );

        Ok(ProgressUpdate::snapshot(
            state,
            discrepancies,
            self.cfg.streaming_hint_words,
        ))
    }

    /// Advance with a cumulative transcript: everything heard so far, as
    /// streaming speech recognizers report it.
    ///
    /// Only the words past [`ProgressState::spoken_words`] are new; a
    /// transcript that has not grown is a no-op.
    pub fn advance_transcript(
        &self,
        state: &mut ProgressState,
        transcript: &str,
    ) -> Result<ProgressUpdate, SessionError> {
        if state.reference.is_none() {
            return self.advance(state, transcript);
        }
        let heard = self.comparator.normalizer().normalize(transcript);
        let words = heard.words();
        let fresh = words.get(state.spoken_words()..).unwrap_or_default();
        self.advance(state, &fresh.join(" "))
    }

    /// Rewind `state` to the start of its reference.
    pub fn reset(&self, state: &mut ProgressState) {
        state.reset();
        info!(reference_words = state.total_reference_words, "session_reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionPhase;
    use diff::{DiffConfig, DiscrepancyKind};
    use normalize::Normalizer;

    const BISMILLAH: &str = "بسم الله الرحمن الرحيم";

    #[test]
    fn windowed_chunks_follow_the_reference() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);
        assert_eq!(state.phase(), SessionPhase::Ready);

        let first = tracker.advance(&mut state, "بسم الله").expect("advance");
        assert!(first.discrepancies.is_empty());
        assert_eq!(first.cursor_position, 2);
        assert_eq!(first.phase, SessionPhase::InProgress);
        assert_eq!(first.hint.words(), ["الرحمن", "الرحيم"]);

        let second = tracker.advance(&mut state, "الرحمان").expect("advance");
        assert_eq!(second.cursor_position, 3);
        assert_eq!(second.discrepancies.len(), 1);
        match &second.discrepancies[0] {
            Discrepancy::Incorrect {
                position,
                expected_word,
                spoken_word,
                ..
            } => {
                assert_eq!(*position, 2);
                assert_eq!(expected_word, "الرحمن");
                assert_eq!(spoken_word, "الرحمان");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(state.accumulated_discrepancies.len(), 1);
        assert!((state.progress_percentage() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn uninitialized_session_is_rejected_untouched() {
        let tracker = SessionTracker::default();
        let mut state = ProgressState::uninitialized();
        let before = state.clone();

        let err = tracker.advance(&mut state, "بسم").unwrap_err();
        assert!(matches!(err, SessionError::InvalidSessionState(_)));
        assert_eq!(state, before);

        let err = tracker.advance_transcript(&mut state, "بسم").unwrap_err();
        assert!(matches!(err, SessionError::InvalidSessionState(_)));
        assert_eq!(state.phase(), SessionPhase::Uninitialized);
    }

    #[test]
    fn empty_chunk_is_a_no_op() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);
        tracker.advance(&mut state, "بسم").expect("advance");

        let update = tracker.advance(&mut state, "  (3) ").expect("advance");
        assert!(update.discrepancies.is_empty());
        assert_eq!(update.cursor_position, 1);
        assert_eq!(state.cursor_position, 1);
    }

    #[test]
    fn complete_session_keeps_accepting_extra_words() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);
        let done = tracker.advance(&mut state, BISMILLAH).expect("advance");
        assert!(done.discrepancies.is_empty());
        assert_eq!(done.phase, SessionPhase::Complete);
        assert!(done.hint.is_end_of_text());
        assert_eq!(done.progress_percentage, 100.0);

        let after = tracker.advance(&mut state, "امين").expect("advance");
        assert_eq!(
            after.discrepancies,
            vec![Discrepancy::Extra {
                position: 4,
                spoken_word: "امين".into()
            }]
        );
        assert_eq!(after.cursor_position, 5);
        assert_eq!(after.progress_percentage, 100.0);
        assert!(after.hint.is_end_of_text());
    }

    #[test]
    fn chunk_overrunning_the_end_reports_extra_at_end() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);
        tracker.advance(&mut state, "بسم الله الرحمن").expect("advance");

        let update = tracker.advance(&mut state, "الرحيم امين").expect("advance");
        assert_eq!(
            update.discrepancies,
            vec![Discrepancy::Extra {
                position: 4,
                spoken_word: "امين".into()
            }]
        );
        assert_eq!(update.cursor_position, 5);
    }

    #[test]
    fn wrong_words_still_move_the_cursor() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);
        let update = tracker.advance(&mut state, "قل هو").expect("advance");
        assert_eq!(update.cursor_position, 2);
        assert_eq!(
            update
                .discrepancies
                .iter()
                .filter(|d| d.kind() == DiscrepancyKind::Incorrect)
                .count(),
            2
        );
    }

    #[test]
    fn cumulative_transcript_only_feeds_new_words() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);

        tracker.advance_transcript(&mut state, "بسم").expect("advance");
        tracker.advance_transcript(&mut state, "بسم الله").expect("advance");
        let stalled = tracker
            .advance_transcript(&mut state, "بسم الله")
            .expect("advance");
        assert_eq!(stalled.cursor_position, 2);
        assert!(stalled.discrepancies.is_empty());

        let last = tracker
            .advance_transcript(&mut state, "بِسْمِ ٱللَّهِ الرحمان الرحيم")
            .expect("advance");
        assert_eq!(last.cursor_position, 4);
        assert_eq!(last.discrepancies.len(), 1);
        assert_eq!(last.discrepancies[0].position(), 2);
    }

    #[test]
    fn reset_rewinds_but_keeps_reference() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start(BISMILLAH);
        let started = state.started_at;
        tracker.advance(&mut state, "بسم الرحيم").expect("advance");
        assert!(!state.accumulated_discrepancies.is_empty());

        tracker.reset(&mut state);
        assert_eq!(state.cursor_position, 0);
        assert!(state.accumulated_discrepancies.is_empty());
        assert_eq!(state.total_reference_words, 4);
        assert_eq!(state.started_at, started);
        assert_eq!(state.phase(), SessionPhase::Ready);
    }

    #[test]
    fn hint_sizes_follow_config() {
        let tracker = SessionTracker::new(
            Comparator::default(),
            SessionConfig {
                hint_words: 2,
                streaming_hint_words: 1,
            },
        )
        .expect("valid config");
        let mut state = tracker.start(BISMILLAH);
        assert_eq!(tracker.hint(&state).words(), ["بسم", "الله"]);

        let update = tracker.advance(&mut state, "بسم").expect("advance");
        assert_eq!(update.hint, Hint::Words(vec!["الله".into()]));
    }

    #[test]
    fn zero_hint_size_rejected() {
        let res = SessionTracker::new(
            Comparator::default(),
            SessionConfig {
                hint_words: 0,
                ..Default::default()
            },
        );
        assert!(matches!(res, Err(SessionError::InvalidConfig(_))));
    }

    #[test]
    fn stale_reference_detected() {
        let normalizer = Normalizer::default();
        let tracker = SessionTracker::new(
            Comparator::new(normalizer.clone(), DiffConfig::default()).expect("comparator"),
            SessionConfig::default(),
        )
        .expect("tracker");
        let state = tracker.start(BISMILLAH);
        assert!(state.matches_reference("بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ", &normalizer));
        assert!(!state.matches_reference("الحمد لله", &normalizer));
        assert!(!ProgressState::uninitialized().matches_reference(BISMILLAH, &normalizer));
    }

    #[test]
    fn empty_reference_is_complete_immediately() {
        let tracker = SessionTracker::default();
        let mut state = tracker.start("");
        assert_eq!(state.phase(), SessionPhase::Complete);
        assert_eq!(state.progress_percentage(), 100.0);

        let update = tracker.advance(&mut state, "بسم").expect("advance");
        assert_eq!(update.discrepancies[0].kind(), DiscrepancyKind::Extra);
        assert_eq!(update.discrepancies[0].position(), 0);
    }
}
