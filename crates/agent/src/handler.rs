//! Task handlers: one model round with tools, then a schema-constrained
//! finalize call.
//!
//! The model gets a single opportunity to request tools. Requested calls are
//! repaired, executed, and fed back as tool-result messages; the structured
//! finalize call then produces the typed response. There is no tool loop.

use std::collections::BTreeSet;
use std::sync::Arc;

use paperhound_core::error::{Error, Result, ToolError};
use paperhound_core::intent::IntentKind;
use paperhound_core::message::Message;
use paperhound_core::provider::{Provider, ProviderRequest, StructuredRequest};
use paperhound_core::response::{
    self, AnswerResponse, CalculationResponse, SummarizationResponse, TaskResponse,
};
use paperhound_core::state::{AgentState, Step};
use paperhound_core::tool::ToolCall;
use paperhound_tools::ToolInvoker;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::prompts;

/// How many trailing turn messages are replayed into the handler prompt.
const CONTEXT_WINDOW_MESSAGES: usize = 4;

/// The task a classified intent resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Qa,
    Summarization,
    Calculation,
}

impl TaskKind {
    /// Unknown intents are handled as general questions.
    pub fn for_intent(kind: IntentKind) -> Self {
        match kind {
            IntentKind::Qa | IntentKind::Unknown => TaskKind::Qa,
            IntentKind::Summarization => TaskKind::Summarization,
            IntentKind::Calculation => TaskKind::Calculation,
        }
    }

    fn schema_name(self) -> &'static str {
        match self {
            TaskKind::Qa => "answer_response",
            TaskKind::Summarization => "summarization_response",
            TaskKind::Calculation => "calculation_response",
        }
    }

    fn schema(self) -> Value {
        match self {
            TaskKind::Qa => response::answer_schema(),
            TaskKind::Summarization => response::summarization_schema(),
            TaskKind::Calculation => response::calculation_schema(),
        }
    }
}

/// Everything observed while executing the tool round.
#[derive(Debug, Default)]
struct ToolObservations {
    tools_used: Vec<String>,
    doc_ids: BTreeSet<String>,
    output_chars: u64,
    calc_expression: Option<String>,
    calc_result: Option<f64>,
}

pub struct TaskHandler {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    invoker: Arc<ToolInvoker>,
}

impl TaskHandler {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, invoker: Arc<ToolInvoker>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.1,
            max_tokens: 2048,
            timeout_secs: 60,
            invoker,
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

    /// Run one task turn, leaving the typed response in
    /// `state.current_response` and advancing to `Step::UpdateMemory`.
    pub async fn run(&self, kind: TaskKind, state: &mut AgentState) -> Result<()> {
        let mut convo = self.build_prompt(kind, state);

        let request = ProviderRequest::new(self.model.clone(), convo.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_timeout_secs(self.timeout_secs)
            .with_tools(self.invoker.registry().definitions());

        let completion = self.provider.complete(request).await?;
        let assistant = completion.message;
        convo.push(assistant.clone());
        state.messages.push(assistant.clone());

        let mut observed = ToolObservations::default();

        for call in &assistant.tool_calls {
            let raw: Value =
                serde_json::from_str(&call.arguments).unwrap_or_else(|_| serde_json::json!({}));
            let arguments = repair_arguments(kind, &call.name, raw, &state.user_input);
            let tool_call = ToolCall::new(&call.id, &call.name, arguments.clone());

            let result = match self.invoker.invoke(&tool_call).await {
                Ok(r) => r,
                Err(ToolError::NotFound(name)) => {
                    warn!(tool = %name, "model requested an unknown tool, skipping");
                    continue;
                }
                Err(e) => return Err(Error::Tool(e)),
            };

            observed.tools_used.push(call.name.clone());
            observed.output_chars += result.output.chars().count() as u64;
            for id in extract_doc_ids(&result.output) {
                observed.doc_ids.insert(id);
            }
            if call.name == "calculator" {
                if let Some(expr) = arguments.get("expression").and_then(Value::as_str) {
                    observed.calc_expression = Some(expr.to_string());
                }
                if let Some(value) = extract_calc_result(&result.output) {
                    observed.calc_result = Some(value);
                }
            }

            let tool_message = Message::tool_result(&call.id, &result.output);
            convo.push(tool_message.clone());
            state.messages.push(tool_message);
        }

        convo.push(Message::user(prompts::finalize_prompt(kind)));

        let structured = StructuredRequest::new(
            self.model.clone(),
            convo,
            kind.schema_name(),
            kind.schema(),
        )
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens)
        .with_timeout_secs(self.timeout_secs);

        let payload = self.provider.complete_structured(structured).await?;
        let response = finish_response(kind, payload, &observed)?;

        debug!(
            tools = observed.tools_used.len(),
            doc_ids = observed.doc_ids.len(),
            "task handler finished"
        );

        state.current_response = Some(response);
        state.tools_used = observed.tools_used;
        state.step = Step::UpdateMemory;
        Ok(())
    }

    fn build_prompt(&self, kind: TaskKind, state: &AgentState) -> Vec<Message> {
        let mut convo = vec![Message::system(prompts::task_system(
            kind,
            &state.conversation_summary,
        ))];

        let skip = state.messages.len().saturating_sub(CONTEXT_WINDOW_MESSAGES);
        convo.extend(state.messages.iter().skip(skip).cloned());

        // The window normally ends with the user's input; re-append it if
        // something else crowded it out.
        let ends_with_input = convo
            .last()
            .is_some_and(|m| m.content == state.user_input);
        if !ends_with_input {
            convo.push(Message::user(&state.user_input));
        }
        convo
    }
}

/// Deterministic argument repair for the one failure mode the model keeps
/// hitting: `document_search` without a `query`.
fn repair_arguments(kind: TaskKind, tool_name: &str, mut arguments: Value, user_input: &str) -> Value {
    if tool_name != "document_search" {
        return arguments;
    }
    let has_query = arguments
        .get("query")
        .and_then(Value::as_str)
        .is_some_and(|q| !q.trim().is_empty());
    if has_query {
        return arguments;
    }

    let fallback = match kind {
        TaskKind::Qa => user_input.to_string(),
        TaskKind::Summarization => user_input
            .split_whitespace()
            .take(5)
            .collect::<Vec<_>>()
            .join(" "),
        TaskKind::Calculation => "total amount sum calculate".to_string(),
    };
    warn!(tool = tool_name, query = %fallback, "repaired missing search query");

    if !arguments.is_object() {
        arguments = serde_json::json!({});
    }
    if let Some(map) = arguments.as_object_mut() {
        map.insert("query".to_string(), Value::String(fallback));
    }
    arguments
}

/// Pull `(ID: <doc_id>)` markers out of tool output.
fn extract_doc_ids(output: &str) -> Vec<String> {
    let Ok(re) = Regex::new(r"ID: ([\w-]+)") else {
        return Vec::new();
    };
    re.captures_iter(output)
        .map(|c| c[1].to_string())
        .collect()
}

/// Parse the numeric value out of calculator output. Thousands separators
/// are stripped; anything unparseable is simply no result.
fn extract_calc_result(output: &str) -> Option<f64> {
    let re = Regex::new(r"result.*?is\s*([\d.,]+)").ok()?;
    let captured = re.captures(output)?;
    captured[1].replace(',', "").parse::<f64>().ok()
}

/// Parse the structured payload and back-fill it from tool observations.
fn finish_response(
    kind: TaskKind,
    payload: Value,
    observed: &ToolObservations,
) -> Result<TaskResponse> {
    match kind {
        TaskKind::Qa => {
            let mut parsed: AnswerResponse = serde_json::from_value(payload)?;
            if parsed.sources.is_empty() {
                parsed.sources = observed.doc_ids.clone();
            }
            Ok(TaskResponse::Answer(parsed))
        }
        TaskKind::Summarization => {
            let mut parsed: SummarizationResponse = serde_json::from_value(payload)?;
            if parsed.document_ids.is_empty() {
                parsed.document_ids = observed.doc_ids.clone();
            }
            if parsed.original_length == 0 {
                parsed.original_length = observed.output_chars;
            }
            Ok(TaskResponse::Summarization(parsed))
        }
        TaskKind::Calculation => {
            let mut parsed: CalculationResponse = serde_json::from_value(payload)?;
            if parsed.sources.is_empty() {
                parsed.sources = observed.doc_ids.clone();
            }
            if parsed.expression.is_empty() {
                if let Some(expr) = &observed.calc_expression {
                    parsed.expression = expr.clone();
                }
            }
            // The evaluator's number beats whatever the model transcribed.
            if observed.calc_result.is_some() {
                parsed.result = observed.calc_result;
            }
            Ok(TaskResponse::Calculation(parsed))
        }
    }
}
