//! The per-turn state machine.
//!
//! ClassifyIntent routes to exactly one task handler, the handler hands off
//! to UpdateMemory, and UpdateMemory ends the turn. Handler errors propagate
//! out of `run` untouched; the caller decides what a failed turn means.

use std::sync::Arc;

use chrono::Utc;
use paperhound_core::error::{Error, Result};
use paperhound_core::intent::{IntentKind, UserIntent};
use paperhound_core::session::ConversationTurn;
use paperhound_core::state::{AgentState, Step};
use tracing::{debug, info};

use crate::classifier::IntentClassifier;
use crate::handler::{TaskHandler, TaskKind};

/// Pure transition from a classified intent to a handler step.
pub fn route_intent(intent: &UserIntent) -> Step {
    match intent.kind {
        IntentKind::Qa | IntentKind::Unknown => Step::QaAgent,
        IntentKind::Summarization => Step::SummarizationAgent,
        IntentKind::Calculation => Step::CalculationAgent,
    }
}

pub struct Router {
    classifier: IntentClassifier,
    handler: TaskHandler,
}

impl Router {
    pub fn new(classifier: IntentClassifier, handler: TaskHandler) -> Self {
        Self { classifier, handler }
    }

    /// Drive one turn to completion.
    pub async fn run(&self, mut state: AgentState) -> Result<AgentState> {
        loop {
            match state.step {
                Step::ClassifyIntent => {
                    let intent = self
                        .classifier
                        .classify(&state.user_input, &state.conversation_summary)
                        .await;
                    state.step = route_intent(&intent);
                    debug!(kind = %intent.kind, next = ?state.step, "routed intent");
                    state.intent = Some(intent);
                }
                Step::QaAgent => {
                    self.handler.run(TaskKind::Qa, &mut state).await?;
                }
                Step::SummarizationAgent => {
                    self.handler.run(TaskKind::Summarization, &mut state).await?;
                }
                Step::CalculationAgent => {
                    self.handler.run(TaskKind::Calculation, &mut state).await?;
                }
                Step::UpdateMemory => {
                    let response = state.current_response.clone().ok_or_else(|| {
                        Error::Internal("update_memory reached without a response".into())
                    })?;
                    for id in response.source_ids() {
                        state.active_documents.insert(id);
                    }
                    state.history.push(ConversationTurn {
                        timestamp: Utc::now(),
                        user_input: state.user_input.clone(),
                        response,
                        intent: state.intent.clone(),
                        tools_used: state.tools_used.clone(),
                    });
                    state.step = Step::End;
                }
                Step::End => {
                    info!(
                        session = %state.session_id,
                        tools = state.tools_used.len(),
                        "turn complete"
                    );
                    return Ok(state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        make_tool_call_response, tool_call, FixtureRetriever, SequentialMockProvider,
    };
    use paperhound_tools::{registry_for, ToolInvoker, ToolLogger};
    use std::collections::BTreeSet;

    #[test]
    fn routing_is_total() {
        let mk = |kind| UserIntent {
            kind,
            confidence: 0.9,
            entities: Default::default(),
        };
        assert_eq!(route_intent(&mk(IntentKind::Qa)), Step::QaAgent);
        assert_eq!(
            route_intent(&mk(IntentKind::Summarization)),
            Step::SummarizationAgent
        );
        assert_eq!(
            route_intent(&mk(IntentKind::Calculation)),
            Step::CalculationAgent
        );
        assert_eq!(route_intent(&UserIntent::unknown()), Step::QaAgent);
    }

    fn router(provider: Arc<SequentialMockProvider>, dir: &std::path::Path) -> Router {
        let registry = registry_for(Arc::new(FixtureRetriever));
        let logger = Arc::new(ToolLogger::new(dir, "s1").unwrap());
        let invoker = Arc::new(ToolInvoker::new(registry, logger));
        Router::new(
            IntentClassifier::new(provider.clone(), "mock-model"),
            TaskHandler::new(provider, "mock-model", invoker),
        )
    }

    #[tokio::test]
    async fn full_turn_materializes_a_history_entry() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(
            SequentialMockProvider::new()
                .structured(Ok(serde_json::json!({"kind": "qa", "confidence": 0.95})))
                .completion(Ok(make_tool_call_response(
                    vec![tool_call(
                        "c1",
                        "document_search",
                        serde_json::json!({"query": "invoice"}),
                    )],
                    "",
                )))
                .structured(Ok(serde_json::json!({
                    "answer": "Two invoices exist.",
                    "sources": []
                }))),
        );
        let router = router(provider, dir.path());
        let state = AgentState::for_turn("s1", "u1", "what invoices exist?", vec![], BTreeSet::new());

        let done = router.run(state).await.unwrap();

        assert_eq!(done.step, Step::End);
        assert_eq!(done.history.len(), 1);
        let turn = &done.history[0];
        assert_eq!(turn.user_input, "what invoices exist?");
        assert_eq!(turn.tools_used, vec!["document_search"]);
        assert_eq!(turn.intent.as_ref().unwrap().kind, IntentKind::Qa);
        assert!(done.active_documents.contains("INV-001"));
    }

    #[tokio::test]
    async fn unknown_classification_still_answers() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(
            SequentialMockProvider::new()
                // classifier payload that fails to parse
                .structured(Ok(serde_json::json!({"category": "??"})))
                .completion(Ok(make_tool_call_response(vec![], "plain reply")))
                .structured(Ok(serde_json::json!({
                    "answer": "Happy to help with your documents.",
                    "sources": []
                }))),
        );
        let router = router(provider, dir.path());
        let state = AgentState::for_turn("s1", "u1", "hi there", vec![], BTreeSet::new());

        let done = router.run(state).await.unwrap();
        assert_eq!(done.history.len(), 1);
        assert_eq!(done.intent.as_ref().unwrap().kind, IntentKind::Unknown);
    }

    #[tokio::test]
    async fn handler_failure_propagates_out() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(
            SequentialMockProvider::new()
                .structured(Ok(serde_json::json!({"kind": "qa", "confidence": 0.9})))
                .completion(Err(paperhound_core::error::ProviderError::Timeout(
                    "no response within 60s".into(),
                ))),
        );
        let router = router(provider, dir.path());
        let state = AgentState::for_turn("s1", "u1", "question", vec![], BTreeSet::new());

        let err = router.run(state).await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }
}
