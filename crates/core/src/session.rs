//! Session state and the persistence contract.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::intent::UserIntent;
use crate::response::TaskResponse;

/// One completed user/assistant exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub timestamp: DateTime<Utc>,
    pub user_input: String,
    pub response: TaskResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<UserIntent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools_used: Vec<String>,
}

/// Durable per-session state. Only successful turns are recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: String,
    pub user_id: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    /// Document ids touched across the session, deduplicated and ordered.
    #[serde(default)]
    pub document_context: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl SessionState {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            conversation_history: Vec::new(),
            document_context: BTreeSet::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Record a completed turn and fold its sources into the document
    /// context.
    pub fn record_turn(&mut self, turn: ConversationTurn) {
        for id in turn.response.source_ids() {
            self.document_context.insert(id);
        }
        self.conversation_history.push(turn);
        self.last_updated = Utc::now();
    }
}

/// Persistence contract for sessions.
///
/// `save` is an idempotent full overwrite; repeated saves of the same state
/// are harmless. `load` of an unknown id is [`SessionError::NotFound`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, user_id: &str) -> Result<SessionState, SessionError>;

    async fn load(&self, session_id: &str) -> Result<SessionState, SessionError>;

    async fn save(&self, state: &SessionState) -> Result<(), SessionError>;

    async fn exists(&self, session_id: &str) -> Result<bool, SessionError>;

    /// All known session ids, in no particular order.
    async fn list(&self) -> Result<Vec<String>, SessionError>;
}
