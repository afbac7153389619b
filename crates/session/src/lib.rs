//! Streaming recitation sessions.
//!
//! A [`ProgressState`] tracks how far a reciter has come through a reference
//! text. [`SessionTracker`] feeds spoken chunks into it, compares each chunk
//! against the reference words at the cursor and reports what to say next.
//!
//! ```rust
//! use session::SessionTracker;
//!
//! let tracker = SessionTracker::default();
//! let mut state = tracker.start("بسم الله الرحمن الرحيم");
//!
//! let update = tracker.advance(&mut state, "بسم الله").unwrap();
//! assert!(update.discrepancies.is_empty());
//! assert_eq!(update.cursor_position, 2);
//!
//! let update = tracker.advance(&mut state, "الرحمان").unwrap();
//! assert_eq!(update.discrepancies.len(), 1);
//! assert_eq!(update.discrepancies[0].position(), 2);
//! assert_eq!(update.cursor_position, 3);
//! ```

mod config;
mod error;
mod state;
mod store;
mod tracker;

pub use crate::config::SessionConfig;
pub use crate::error::SessionError;
pub use crate::state::{Hint, ProgressState, ProgressUpdate, SessionPhase};
pub use crate::store::{InMemorySessionStore, SessionStore};
pub use crate::tracker::SessionTracker;
