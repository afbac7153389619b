//! Reference passages and where they come from.
//!
//! The recitation core never fetches text itself. It asks a
//! [`ReferenceProvider`] for a [`Passage`] by number and works with the raw
//! verse texts it gets back; [`InMemoryProvider`] covers tests, bundled
//! corpora and payloads fetched elsewhere.

mod error;
mod provider;
mod types;

pub use crate::error::ReferenceError;
pub use crate::provider::{InMemoryProvider, ReferenceProvider};
pub use crate::types::{Passage, PassageSummary, Verse, OPENING_PASSAGE};
