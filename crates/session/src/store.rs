use dashmap::DashMap;
use uuid::Uuid;

use crate::error::SessionError;
use crate::state::ProgressState;

/// Persistence for [`ProgressState`] across calls.
///
/// The store owns no comparison logic; it keeps the state (including the
/// cached normalized reference) between the calls of one session.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &str) -> Result<Option<ProgressState>, SessionError>;
    fn save(&self, id: &str, state: &ProgressState) -> Result<(), SessionError>;
    fn remove(&self, id: &str) -> Result<Option<ProgressState>, SessionError>;
}

/// Concurrent in-process store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, ProgressState>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `state` under a fresh random id and return the id.
    pub fn create(&self, state: ProgressState) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), state);
        id
    }

    /// Run `f` on the stored state while holding that session's entry lock,
    /// so two calls for the same session never interleave.
    pub fn update<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ProgressState) -> Result<R, SessionError>,
    ) -> Result<R, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::Store(format!("unknown session {id}")))?;
        f(entry.value_mut())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &str) -> Result<Option<ProgressState>, SessionError> {
        Ok(self.sessions.get(id).map(|entry| entry.value().clone()))
    }

    fn save(&self, id: &str, state: &ProgressState) -> Result<(), SessionError> {
        self.sessions.insert(id.to_owned(), state.clone());
        Ok(())
    }

    fn remove(&self, id: &str) -> Result<Option<ProgressState>, SessionError> {
        Ok(self.sessions.remove(id).map(|(_, state)| state))
    }
}
