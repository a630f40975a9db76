//! Intent classification.
//!
//! One structured model call. Classification is total: any provider error,
//! parse failure, or out-of-range confidence degrades to
//! `UserIntent::unknown()` so a turn always routes somewhere.

use std::sync::Arc;

use paperhound_core::intent::{self, UserIntent};
use paperhound_core::message::Message;
use paperhound_core::provider::{Provider, StructuredRequest};
use tracing::{debug, warn};

use crate::prompts;

pub struct IntentClassifier {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    timeout_secs: u64,
}

impl IntentClassifier {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            timeout_secs: 60,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Classify `user_input` given the running conversation summary.
    pub async fn classify(&self, user_input: &str, summary: &str) -> UserIntent {
        let messages = vec![
            Message::system(prompts::classifier_system(summary)),
            Message::user(user_input),
        ];
        let request = StructuredRequest::new(
            self.model.clone(),
            messages,
            "user_intent",
            intent::schema(),
        )
        .with_temperature(self.temperature)
        .with_timeout_secs(self.timeout_secs);

        let value = match self.provider.complete_structured(request).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "intent classification failed, treating as unknown");
                return UserIntent::unknown();
            }
        };

        match serde_json::from_value::<UserIntent>(value) {
            Ok(mut parsed) => {
                if !parsed.confidence.is_finite() {
                    parsed.confidence = 0.0;
                }
                parsed.confidence = parsed.confidence.clamp(0.0, 1.0);
                debug!(kind = %parsed.kind, confidence = parsed.confidence, "classified intent");
                parsed
            }
            Err(e) => {
                warn!(error = %e, "intent payload did not match schema, treating as unknown");
                UserIntent::unknown()
            }
        }
    }
}
