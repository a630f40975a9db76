//! File-based session store.
//!
//! One pretty-printed JSON file per session, named `<session_id>.json`,
//! under the configured session directory. Saves are full overwrites; the
//! last writer wins and repeated saves of the same state are idempotent.
//! No file locking.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use paperhound_core::error::SessionError;
use paperhound_core::session::{SessionState, SessionStore};
use tracing::{debug, warn};

/// A directory of session files.
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `dir`. The directory is created if absent.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            SessionError::Storage(format!(
                "failed to create session directory {}: {e}",
                dir.display()
            ))
        })?;
        debug!(dir = %dir.display(), "file session store ready");
        Ok(Self { dir })
    }

    fn path_for(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{session_id}.json"))
    }

    fn read_state(&self, path: &Path, session_id: &str) -> Result<SessionState, SessionError> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SessionError::NotFound(session_id.to_string()))
            }
            Err(e) => {
                return Err(SessionError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        serde_json::from_str(&text).map_err(|e| SessionError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn create(&self, user_id: &str) -> Result<SessionState, SessionError> {
        let state = SessionState::new(user_id);
        self.save(&state).await?;
        debug!(session_id = %state.session_id, user_id, "created session");
        Ok(state)
    }

    async fn load(&self, session_id: &str) -> Result<SessionState, SessionError> {
        let path = self.path_for(session_id);
        self.read_state(&path, session_id)
    }

    async fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        let path = self.path_for(&state.session_id);
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| SessionError::Storage(format!("failed to serialize session: {e}")))?;
        std::fs::write(&path, json).map_err(|e| {
            SessionError::Storage(format!("failed to write {}: {e}", path.display()))
        })?;
        Ok(())
    }

    async fn exists(&self, session_id: &str) -> Result<bool, SessionError> {
        Ok(self.path_for(session_id).exists())
    }

    async fn list(&self) -> Result<Vec<String>, SessionError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            SessionError::Storage(format!("failed to read {}: {e}", self.dir.display()))
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| SessionError::Storage(format!("failed to read dir entry: {e}")))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => ids.push(stem.to_string()),
                None => warn!(path = %path.display(), "skipping session file with odd name"),
            }
        }
        Ok(ids)
    }
}
