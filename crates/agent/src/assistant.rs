//! The caller-facing assistant.
//!
//! Owns the provider, the retriever-backed tool registry, and the session
//! store. Sessions bind a fresh tool logger and invoker; turns run through
//! the router and only successful turns touch the session.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use paperhound_core::error::{Error, Result};
use paperhound_core::intent::UserIntent;
use paperhound_core::provider::Provider;
use paperhound_core::response::TaskResponse;
use paperhound_core::retrieval::Retriever;
use paperhound_core::session::{ConversationTurn, SessionState, SessionStore};
use paperhound_core::state::AgentState;
use paperhound_tools::{registry_for, ToolInvoker, ToolLogger};
use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::IntentClassifier;
use crate::handler::TaskHandler;
use crate::memory::MemoryManager;
use crate::router::Router;

/// What one `process_message` call produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub success: bool,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<TaskResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<UserIntent>,
    pub tools_used: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Assistant {
    provider: Arc<dyn Provider>,
    retriever: Arc<dyn Retriever>,
    store: Arc<dyn SessionStore>,
    logs_dir: PathBuf,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    session: Option<SessionState>,
    invoker: Option<Arc<ToolInvoker>>,
}

impl Assistant {
    pub fn new(
        provider: Arc<dyn Provider>,
        retriever: Arc<dyn Retriever>,
        store: Arc<dyn SessionStore>,
        logs_dir: impl Into<PathBuf>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            retriever,
            store,
            logs_dir: logs_dir.into(),
            model: model.into(),
            temperature: 0.1,
            max_tokens: 2048,
            timeout_secs: 60,
            session: None,
            invoker: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Resume `session_id` if the store knows it, otherwise start fresh.
    /// Either way the tool logger and invoker are rebound to the session.
    pub async fn start_session(
        &mut self,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Result<String> {
        let session = match session_id {
            Some(id) if self.store.exists(id).await? => {
                let state = self.store.load(id).await?;
                info!(session = id, turns = state.conversation_history.len(), "resumed session");
                state
            }
            Some(id) => {
                warn!(session = id, "unknown session id, starting a new one");
                self.store.create(user_id).await?
            }
            None => self.store.create(user_id).await?,
        };

        let logger = Arc::new(ToolLogger::new(&self.logs_dir, &session.session_id)?);
        let registry = registry_for(self.retriever.clone());
        self.invoker = Some(Arc::new(ToolInvoker::new(registry, logger)));

        let id = session.session_id.clone();
        self.session = Some(session);
        Ok(id)
    }

    /// Run one turn. Turn failures come back as a failed outcome; the
    /// session is only written when the turn fully succeeds.
    pub async fn process_message(&mut self, user_input: &str) -> Result<ProcessOutcome> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| Error::Internal("no active session; call start_session first".into()))?;
        let invoker = self
            .invoker
            .clone()
            .ok_or_else(|| Error::Internal("no tool invoker bound".into()))?;
        let session_id = session.session_id.clone();

        let memory = MemoryManager::new(self.provider.clone(), self.model.clone())
            .with_timeout_secs(self.timeout_secs);
        let summary = match memory.summary(&session.conversation_history).await {
            Ok(s) => s,
            Err(e) => {
                return Ok(self.failed_outcome(session_id, e));
            }
        };

        let mut state = AgentState::for_turn(
            session_id.clone(),
            session.user_id.clone(),
            user_input,
            session.conversation_history.clone(),
            session.document_context.clone(),
        );
        state.conversation_summary = summary;

        let classifier = IntentClassifier::new(self.provider.clone(), self.model.clone())
            .with_timeout_secs(self.timeout_secs);
        let handler = TaskHandler::new(self.provider.clone(), self.model.clone(), invoker)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_timeout_secs(self.timeout_secs);
        let router = Router::new(classifier, handler);

        let done = match router.run(state).await {
            Ok(done) => done,
            Err(e) => {
                return Ok(self.failed_outcome(session_id, e));
            }
        };

        // The router appended exactly one turn for this input.
        let turn = done
            .history
            .last()
            .cloned()
            .ok_or_else(|| Error::Internal("turn finished without a history entry".into()))?;

        // Record the turn on a copy and commit only once it is durably
        // saved, so a storage failure leaves the session exactly as it was.
        let mut updated = self
            .session
            .as_ref()
            .ok_or_else(|| Error::Internal("session vanished mid-turn".into()))?
            .clone();
        updated.record_turn(turn.clone());
        if let Err(e) = self.store.save(&updated).await {
            return Ok(self.failed_outcome(session_id, e.into()));
        }
        self.session = Some(updated);

        Ok(ProcessOutcome {
            success: true,
            session_id,
            response: Some(turn.response),
            intent: turn.intent,
            tools_used: turn.tools_used,
            error: None,
        })
    }

    fn failed_outcome(&self, session_id: String, error: Error) -> ProcessOutcome {
        warn!(session = %session_id, error = %error, "turn failed, session untouched");
        ProcessOutcome {
            success: false,
            session_id,
            response: None,
            intent: None,
            tools_used: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Conversation history of the active session.
    pub fn history(&self) -> &[ConversationTurn] {
        self.session
            .as_ref()
            .map(|s| s.conversation_history.as_slice())
            .unwrap_or(&[])
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.session_id.as_str())
    }

    /// Copy the active session's tool log to `path`.
    pub async fn export_logs(&self, path: impl AsRef<Path>) -> Result<()> {
        let invoker = self
            .invoker
            .as_ref()
            .ok_or_else(|| Error::Internal("no active session; call start_session first".into()))?;
        invoker.logger().export(path).await?;
        Ok(())
    }
}
