//! User intent classification types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The task category a user message maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Qa,
    Summarization,
    Calculation,
    Unknown,
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IntentKind::Qa => "qa",
            IntentKind::Summarization => "summarization",
            IntentKind::Calculation => "calculation",
            IntentKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A classified user intent with confidence and extracted entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIntent {
    pub kind: IntentKind,
    pub confidence: f32,
    #[serde(default)]
    pub entities: BTreeMap<String, String>,
}

impl UserIntent {
    /// The fallback intent when classification fails.
    pub fn unknown() -> Self {
        Self {
            kind: IntentKind::Unknown,
            confidence: 0.0,
            entities: BTreeMap::new(),
        }
    }
}

/// JSON schema used to constrain the classifier's structured output.
pub fn schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "kind": {
                "type": "string",
                "enum": ["qa", "summarization", "calculation", "unknown"],
                "description": "The task category of the user's message"
            },
            "confidence": {
                "type": "number",
                "description": "Classifier confidence between 0.0 and 1.0"
            },
            "entities": {
                "type": "object",
                "description": "Key entities mentioned in the message, e.g. document ids or amounts",
                "additionalProperties": { "type": "string" }
            }
        },
        "required": ["kind", "confidence"],
        "additionalProperties": false
    })
}
