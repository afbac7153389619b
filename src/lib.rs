//! Workspace umbrella crate for Tasmee, a recitation checker.
//!
//! This crate stitches the stage crates together behind one API: normalize
//! two Arabic texts, align them word by word, classify every deviation and
//! track a reciter's progress through a passage as spoken chunks arrive.
//!
//! Batch mode:
//!
//! ```rust
//! use tasmee::{compare_full, summarize_comparison};
//!
//! let spoken = "الحمد للة رب العلمين";
//! let reference = "الحمد لله رب العالمين";
//! let result = compare_full(spoken, reference);
//! assert_eq!(result.discrepancies.len(), 1);
//!
//! let report = summarize_comparison(&result, 4, 4);
//! assert_eq!(report.accuracy, 97.6);
//! ```
//!
//! Streaming mode:
//!
//! ```rust
//! use tasmee::{advance, start_session};
//!
//! let mut state = start_session("بسم الله الرحمن الرحيم");
//! let update = advance(&mut state, "بسم الله").unwrap();
//! assert_eq!(update.cursor_position, 2);
//! ```

pub mod config;

pub use crate::config::{ConfigLoadError, TasmeeConfig};
pub use align::{AlignConfig, OpTag, Opcode, SequenceMatcher};
pub use diff::{
    Comparator, ComparisonResult, DiffConfig, DiffError, Discrepancy, DiscrepancyKind, WordMatch,
    WordMatcher, classify, words_match,
};
pub use feedback::{CategoryCounts, Report, suggest, summarize, summarize_comparison};
pub use normalize::{
    CharacterEquivalenceTable, NormalizeConfig, NormalizeError, NormalizedText, Normalizer, Token,
    normalize,
};
pub use reference::{
    InMemoryProvider, Passage, PassageSummary, ReferenceError, ReferenceProvider, Verse,
};
pub use session::{
    Hint, InMemorySessionStore, ProgressState, ProgressUpdate, SessionConfig, SessionError,
    SessionPhase, SessionStore, SessionTracker,
};

use std::error::Error;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use tracing::{Level, info, warn};

/// Errors surfaced by the recitation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecitationError {
    /// A text was empty after normalization where words were required.
    EmptyInput,
    ReferenceUnavailable(ReferenceError),
    InvalidSessionState(String),
    Normalize(NormalizeError),
    Diff(DiffError),
    Session(SessionError),
    Config(String),
}

impl fmt::Display for RecitationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecitationError::EmptyInput => write!(f, "text is empty after normalization"),
            RecitationError::ReferenceUnavailable(err) => {
                write!(f, "no reference text available: {err}")
            }
            RecitationError::InvalidSessionState(msg) => write!(f, "invalid session state: {msg}"),
            RecitationError::Normalize(err) => write!(f, "normalizer setup failed: {err}"),
            RecitationError::Diff(err) => write!(f, "comparator setup failed: {err}"),
            RecitationError::Session(err) => write!(f, "session failure: {err}"),
            RecitationError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl Error for RecitationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RecitationError::ReferenceUnavailable(err) => Some(err),
            RecitationError::Normalize(err) => Some(err),
            RecitationError::Diff(err) => Some(err),
            RecitationError::Session(err) => Some(err),
            RecitationError::EmptyInput
            | RecitationError::InvalidSessionState(_)
            | RecitationError::Config(_) => None,
        }
    }
}

impl From<ReferenceError> for RecitationError {
    fn from(value: ReferenceError) -> Self {
        RecitationError::ReferenceUnavailable(value)
    }
}

impl From<NormalizeError> for RecitationError {
    fn from(value: NormalizeError) -> Self {
        RecitationError::Normalize(value)
    }
}

impl From<DiffError> for RecitationError {
    fn from(value: DiffError) -> Self {
        RecitationError::Diff(value)
    }
}

impl From<SessionError> for RecitationError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::InvalidSessionState(msg) => RecitationError::InvalidSessionState(msg),
            other => RecitationError::Session(other),
        }
    }
}

impl From<ConfigLoadError> for RecitationError {
    fn from(value: ConfigLoadError) -> Self {
        RecitationError::Config(value.to_string())
    }
}

/// Metrics observer for the recitation API.
pub trait RecitationMetrics: Send + Sync {
    /// One batch comparison and the number of discrepancies it found.
    fn record_compare(&self, latency: Duration, discrepancies: usize);
    /// One streaming chunk; `Ok` carries the chunk's discrepancy count.
    fn record_advance(&self, latency: Duration, result: Result<usize, RecitationError>);
}

/// Install or clear the global recitation metrics recorder.
pub fn set_recitation_metrics(recorder: Option<Arc<dyn RecitationMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn RecitationMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn RecitationMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn RecitationMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn RecitationMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_compare(self, discrepancies: usize) {
        self.recorder
            .record_compare(self.start.elapsed(), discrepancies);
    }

    fn record_advance(self, result: Result<usize, RecitationError>) {
        self.recorder.record_advance(self.start.elapsed(), result);
    }
}

/// A configured checker: one normalizer, comparator and session tracker
/// built from a [`TasmeeConfig`].
#[derive(Debug, Clone, Default)]
pub struct Recitation {
    tracker: SessionTracker,
}

impl Recitation {
    pub fn new(cfg: &TasmeeConfig) -> Result<Self, RecitationError> {
        cfg.validate()?;
        let normalizer = Normalizer::new(cfg.normalize.clone())?;
        let comparator = Comparator::new(normalizer, cfg.diff.clone())?;
        let tracker = SessionTracker::new(comparator, cfg.session)?;
        Ok(Self { tracker })
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.tracker.comparator().normalizer()
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Compare a whole spoken text against its reference.
    ///
    /// Never fails: an empty side yields a result with `empty_input` set,
    /// no discrepancies and similarity 0.
    pub fn compare_full(&self, spoken: &str, reference: &str) -> ComparisonResult {
        let metrics = MetricsSpan::start();
        let start = Instant::now();

        let spoken = self.normalizer().normalize(spoken);
        let reference = self.normalizer().normalize(reference);

        let span = tracing::span!(
            Level::INFO,
            "tasmee.compare_full",
            spoken_digest = %short_digest(&spoken),
            reference_digest = %short_digest(&reference)
        );
        let _guard = span.enter();

        let result = self
            .tracker
            .comparator()
            .compare_normalized(&spoken, &reference);

        let elapsed_micros = start.elapsed().as_micros();
        if result.empty_input {
            warn!(
                spoken_words = spoken.word_count(),
                reference_words = reference.word_count(),
                elapsed_micros,
                "compare_empty_input"
            );
        } else {
            info!(
                spoken_words = spoken.word_count(),
                reference_words = reference.word_count(),
                discrepancies = result.discrepancies.len(),
                overall_similarity = result.overall_similarity,
                elapsed_micros,
                "compare_success"
            );
        }
        if let Some(span) = metrics {
            span.record_compare(result.discrepancies.len());
        }
        result
    }

    /// Open a streaming session over `reference`.
    pub fn start_session(&self, reference: &str) -> ProgressState {
        self.tracker.start(reference)
    }

    /// Fetch passage `number` from `provider` and open a session over it.
    pub fn start_session_from_provider(
        &self,
        provider: &dyn ReferenceProvider,
        number: u32,
    ) -> Result<ProgressState, RecitationError> {
        let reference = self.load_reference(provider, number)?;
        Ok(self.tracker.start_normalized(reference))
    }

    /// Fetch passage `number` and normalize its recitation text.
    pub fn load_reference(
        &self,
        provider: &dyn ReferenceProvider,
        number: u32,
    ) -> Result<NormalizedText, RecitationError> {
        let passage = provider.passage(number).map_err(|err| {
            warn!(passage = number, error = %err, "reference_unavailable");
            RecitationError::ReferenceUnavailable(err)
        })?;
        Ok(self.normalizer().normalize(&passage.recitation_text()))
    }

    /// Compare one spoken chunk at the session cursor.
    ///
    /// Atomic: on error `state` is unchanged.
    pub fn advance(
        &self,
        state: &mut ProgressState,
        chunk: &str,
    ) -> Result<ProgressUpdate, RecitationError> {
        let metrics = MetricsSpan::start();
        let span = tracing::span!(
            Level::INFO,
            "tasmee.advance",
            cursor = state.cursor_position,
            reference_words = state.total_reference_words
        );
        let _guard = span.enter();

        let result = self.tracker.advance(state, chunk).map_err(RecitationError::from);
        if let Some(span) = metrics {
            span.record_advance(
                result
                    .as_ref()
                    .map(|update| update.discrepancies.len())
                    .map_err(|err| err.clone()),
            );
        }
        result
    }

    /// Advance with a cumulative transcript; see
    /// [`SessionTracker::advance_transcript`].
    pub fn advance_transcript(
        &self,
        state: &mut ProgressState,
        transcript: &str,
    ) -> Result<ProgressUpdate, RecitationError> {
        let span = tracing::span!(
            Level::INFO,
            "tasmee.advance_transcript",
            cursor = state.cursor_position
        );
        let _guard = span.enter();
        self.tracker
            .advance_transcript(state, transcript)
            .map_err(RecitationError::from)
    }

    pub fn reset(&self, state: &mut ProgressState) {
        self.tracker.reset(state);
    }

    /// Report for a streaming session so far.
    pub fn session_report(&self, state: &ProgressState) -> Report {
        summarize(
            &state.accumulated_discrepancies,
            state.total_reference_words,
            state.spoken_words(),
        )
    }
}

fn short_digest(text: &NormalizedText) -> &str {
    text.digest.get(..12).unwrap_or(&text.digest)
}

fn default_recitation() -> &'static Recitation {
    static DEFAULT: OnceLock<Recitation> = OnceLock::new();
    DEFAULT.get_or_init(Recitation::default)
}

/// [`Recitation::compare_full`] with default configuration.
pub fn compare_full(spoken: &str, reference: &str) -> ComparisonResult {
    default_recitation().compare_full(spoken, reference)
}

/// [`Recitation::start_session`] with default configuration.
pub fn start_session(reference: &str) -> ProgressState {
    default_recitation().start_session(reference)
}

/// [`Recitation::start_session_from_provider`] with default configuration.
pub fn start_session_from_provider(
    provider: &dyn ReferenceProvider,
    number: u32,
) -> Result<ProgressState, RecitationError> {
    default_recitation().start_session_from_provider(provider, number)
}

/// [`Recitation::advance`] with default configuration.
pub fn advance(state: &mut ProgressState, chunk: &str) -> Result<ProgressUpdate, RecitationError> {
    default_recitation().advance(state, chunk)
}

/// [`Recitation::advance_transcript`] with default configuration.
pub fn advance_transcript(
    state: &mut ProgressState,
    transcript: &str,
) -> Result<ProgressUpdate, RecitationError> {
    default_recitation().advance_transcript(state, transcript)
}

/// Rewind a session to the start of its reference.
pub fn reset(state: &mut ProgressState) {
    default_recitation().reset(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};

    #[test]
    fn recitation_from_config() {
        let cfg = TasmeeConfig {
            diff: DiffConfig {
                report_near_matches: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let recitation = Recitation::new(&cfg).expect("valid config");
        let result = recitation.compare_full("الحمد للة رب العلمين", "الحمد لله رب العالمين");
        assert!(result.discrepancies.is_empty());
    }

    #[test]
    fn invalid_config_surfaces_as_config_error() {
        let cfg = TasmeeConfig {
            version: "9".into(),
            ..Default::default()
        };
        assert!(matches!(
            Recitation::new(&cfg),
            Err(RecitationError::Config(_))
        ));
    }

    #[test]
    fn session_errors_map_to_recitation_errors() {
        let err: RecitationError = SessionError::InvalidSessionState("x".into()).into();
        assert_eq!(err, RecitationError::InvalidSessionState("x".into()));

        let err: RecitationError = SessionError::Store("down".into()).into();
        assert!(matches!(err, RecitationError::Session(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn session_report_uses_word_accuracy() {
        let mut state = start_session("قل هو الله احد");
        advance(&mut state, "قل هو الله").expect("advance");
        advance(&mut state, "الصمد").expect("advance");

        let report = default_recitation().session_report(&state);
        assert_eq!(report.incorrect, 1);
        assert_eq!(report.accuracy, 75.0);
        assert_eq!(report.completion, 100.0);
    }

    #[derive(Default)]
    struct CountingMetrics {
        events: Arc<RwLock<Vec<&'static str>>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }
    }

    impl RecitationMetrics for CountingMetrics {
        fn record_compare(&self, _latency: Duration, _discrepancies: usize) {
            self.events.write().unwrap().push("compare");
        }

        fn record_advance(&self, _latency: Duration, result: Result<usize, RecitationError>) {
            let label = if result.is_ok() {
                "advance_ok"
            } else {
                "advance_err"
            };
            self.events.write().unwrap().push(label);
        }
    }

    #[test]
    fn metrics_recorder_tracks_outcomes() {
        let metrics = Arc::new(CountingMetrics::default());
        set_recitation_metrics(Some(metrics.clone()));

        compare_full("بسم الله", "بسم الله");
        let mut state = start_session("بسم الله");
        advance(&mut state, "بسم").expect("advance");
        let mut empty = ProgressState::uninitialized();
        assert!(advance(&mut empty, "بسم").is_err());

        let events = metrics.snapshot();
        assert!(events.contains(&"compare"));
        assert!(events.contains(&"advance_ok"));
        assert!(events.contains(&"advance_err"));

        set_recitation_metrics(None);
    }
}
