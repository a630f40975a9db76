//! Per-turn agent state and routing steps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intent::UserIntent;
use crate::message::Message;
use crate::response::TaskResponse;
use crate::session::ConversationTurn;

/// The next node the router will execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ClassifyIntent,
    QaAgent,
    SummarizationAgent,
    CalculationAgent,
    UpdateMemory,
    End,
}

/// Mutable state threaded through one turn of the routing graph.
#[derive(Debug, Clone)]
pub struct AgentState {
    /// Messages accumulated this turn, starting with the user's input.
    pub messages: Vec<Message>,
    pub user_input: String,
    pub intent: Option<UserIntent>,
    pub step: Step,
    /// Prior turns loaded from the session, oldest first.
    pub history: Vec<ConversationTurn>,
    /// Rolling summary of the conversation so far.
    pub conversation_summary: String,
    /// Document ids in play this session.
    pub active_documents: BTreeSet<String>,
    pub current_response: Option<TaskResponse>,
    /// Tool names invoked this turn, in invocation order.
    pub tools_used: Vec<String>,
    pub session_id: String,
    pub user_id: String,
}

impl AgentState {
    /// Fresh turn state seeded from session context.
    pub fn for_turn(
        session_id: impl Into<String>,
        user_id: impl Into<String>,
        user_input: impl Into<String>,
        history: Vec<ConversationTurn>,
        active_documents: BTreeSet<String>,
    ) -> Self {
        let user_input = user_input.into();
        Self {
            messages: vec![Message::user(user_input.clone())],
            user_input,
            intent: None,
            step: Step::ClassifyIntent,
            history,
            conversation_summary: String::new(),
            active_documents,
            current_response: None,
            tools_used: Vec::new(),
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }
}
