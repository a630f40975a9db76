//! Per-session tool invocation log.
//!
//! Append-only. Every append rewrites the session's log file as a pretty
//! JSON array, so the on-disk log always reflects the full history. Entries
//! are never removed, even for failed turns.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use paperhound_core::error::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

const RESULT_SUMMARY_MAX_CHARS: usize = 500;

/// One logged tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolLogEntry {
    pub timestamp: DateTime<Utc>,
    pub session_id: String,
    pub tool_name: String,
    pub arguments: Value,
    pub success: bool,
    /// First 500 characters of the tool output.
    pub result_summary: String,
}

/// Tool log bound to a single session.
pub struct ToolLogger {
    session_id: String,
    path: PathBuf,
    entries: Arc<RwLock<Vec<ToolLogEntry>>>,
}

impl ToolLogger {
    /// Create a logger writing to `<logs_dir>/session_<id>.json`.
    pub fn new(logs_dir: impl Into<PathBuf>, session_id: impl Into<String>) -> Result<Self, ToolError> {
        let logs_dir = logs_dir.into();
        let session_id = session_id.into();
        std::fs::create_dir_all(&logs_dir).map_err(|e| ToolError::ExecutionFailed {
            tool_name: "tool_logger".into(),
            reason: format!("failed to create {}: {e}", logs_dir.display()),
        })?;
        let path = logs_dir.join(format!("session_{session_id}.json"));
        let entries = Self::load(&path);
        Ok(Self {
            session_id,
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    fn load(path: &Path) -> Vec<ToolLogEntry> {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Record one invocation and flush the full log to disk.
    pub async fn append(
        &self,
        tool_name: &str,
        arguments: &Value,
        success: bool,
        output: &str,
    ) -> Result<(), ToolError> {
        let entry = ToolLogEntry {
            timestamp: Utc::now(),
            session_id: self.session_id.clone(),
            tool_name: tool_name.to_string(),
            arguments: arguments.clone(),
            success,
            result_summary: output.chars().take(RESULT_SUMMARY_MAX_CHARS).collect(),
        };

        let mut entries = self.entries.write().await;
        entries.push(entry);
        let json = serde_json::to_string_pretty(&*entries).map_err(|e| {
            ToolError::ExecutionFailed {
                tool_name: "tool_logger".into(),
                reason: format!("failed to serialize log: {e}"),
            }
        })?;
        std::fs::write(&self.path, json).map_err(|e| ToolError::ExecutionFailed {
            tool_name: "tool_logger".into(),
            reason: format!("failed to write {}: {e}", self.path.display()),
        })?;
        debug!(tool = tool_name, session = %self.session_id, "logged tool invocation");
        Ok(())
    }

    pub async fn entries(&self) -> Vec<ToolLogEntry> {
        self.entries.read().await.clone()
    }

    /// Copy the current log to another path.
    pub async fn export(&self, path: impl AsRef<Path>) -> Result<(), ToolError> {
        let entries = self.entries.read().await;
        let json =
            serde_json::to_string_pretty(&*entries).map_err(|e| ToolError::ExecutionFailed {
                tool_name: "tool_logger".into(),
                reason: format!("failed to serialize log: {e}"),
            })?;
        std::fs::write(path.as_ref(), json).map_err(|e| ToolError::ExecutionFailed {
            tool_name: "tool_logger".into(),
            reason: format!("failed to write {}: {e}", path.as_ref().display()),
        })?;
        Ok(())
    }
}
