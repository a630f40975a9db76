//! Conversation memory.
//!
//! Short histories are replayed verbatim; longer ones are compressed with a
//! single model call. The thresholds are turn counts, not tokens, so the
//! policy is deterministic.

use std::sync::Arc;

use paperhound_core::error::Result;
use paperhound_core::message::Message;
use paperhound_core::provider::{Provider, ProviderRequest};
use paperhound_core::session::ConversationTurn;
use tracing::debug;

use crate::prompts;

/// Turns replayed into the summary window.
const WINDOW_TURNS: usize = 5;
/// Histories at or below this many turns skip the model entirely.
const VERBATIM_THRESHOLD: usize = 3;

pub struct MemoryManager {
    provider: Arc<dyn Provider>,
    model: String,
    timeout_secs: u64,
}

impl MemoryManager {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            timeout_secs: 60,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Produce the conversation summary fed into prompts.
    pub async fn summary(&self, history: &[ConversationTurn]) -> Result<String> {
        if history.is_empty() {
            return Ok("No previous conversation.".to_string());
        }

        let window = format_window(history);
        if history.len() <= VERBATIM_THRESHOLD {
            return Ok(window);
        }

        debug!(turns = history.len(), "compressing conversation window");
        let request = ProviderRequest::new(
            self.model.clone(),
            vec![Message::user(prompts::memory_compression(&window))],
        )
        .with_temperature(0.0)
        .with_max_tokens(256)
        .with_timeout_secs(self.timeout_secs);

        let response = self.provider.complete(request).await?;
        Ok(response.message.content.trim().to_string())
    }
}

/// The last five turns as `User: ...` / `Assistant: ...` lines.
fn format_window(history: &[ConversationTurn]) -> String {
    let skip = history.len().saturating_sub(WINDOW_TURNS);
    history[skip..]
        .iter()
        .map(|turn| {
            format!(
                "User: {}\nAssistant: {}",
                turn.user_input,
                turn.response.text()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
