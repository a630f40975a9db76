//! In-memory session store. Useful for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use paperhound_core::error::SessionError;
use paperhound_core::session::{SessionState, SessionStore};
use tokio::sync::RwLock;

/// Sessions held in a map, gone when the process exits.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: &str) -> Result<SessionState, SessionError> {
        let state = SessionState::new(user_id);
        self.sessions
            .write()
            .await
            .insert(state.session_id.clone(), state.clone());
        Ok(state)
    }

    async fn load(&self, session_id: &str) -> Result<SessionState, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    async fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .insert(state.session_id.clone(), state.clone());
        Ok(())
    }

    async fn exists(&self, session_id: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.read().await.contains_key(session_id))
    }

    async fn list(&self) -> Result<Vec<String>, SessionError> {
        Ok(self.sessions.read().await.keys().cloned().collect())
    }
}
