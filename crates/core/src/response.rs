//! Structured task responses.
//!
//! Each task kind produces a typed response parsed from schema-constrained
//! model output. `TaskResponse` is the tagged union stored in session
//! history.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer to a question, with the document ids it cites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: BTreeSet<String>,
}

/// Summary of one or more documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizationResponse {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub document_ids: BTreeSet<String>,
    #[serde(default)]
    pub original_length: u64,
}

/// Result of a numeric calculation over documents.
///
/// `result` is `None` when no numeric value could be extracted; the
/// explanation still carries the model's reasoning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub expression: String,
    pub result: Option<f64>,
    pub explanation: String,
    #[serde(default)]
    pub sources: BTreeSet<String>,
}

/// A completed task's response, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskResponse {
    Answer(AnswerResponse),
    Summarization(SummarizationResponse),
    Calculation(CalculationResponse),
}

impl TaskResponse {
    /// The primary display text: answer, summary, or explanation.
    pub fn text(&self) -> &str {
        match self {
            TaskResponse::Answer(r) => &r.answer,
            TaskResponse::Summarization(r) => &r.summary,
            TaskResponse::Calculation(r) => &r.explanation,
        }
    }

    /// Document ids this response draws on.
    pub fn source_ids(&self) -> BTreeSet<String> {
        match self {
            TaskResponse::Answer(r) => r.sources.clone(),
            TaskResponse::Summarization(r) => r.document_ids.clone(),
            TaskResponse::Calculation(r) => r.sources.clone(),
        }
    }
}

/// Schema for [`AnswerResponse`].
pub fn answer_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "answer": {
                "type": "string",
                "description": "The answer to the user's question"
            },
            "sources": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Document ids the answer is based on"
            }
        },
        "required": ["answer"],
        "additionalProperties": false
    })
}

/// Schema for [`SummarizationResponse`].
pub fn summarization_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "Concise summary of the documents"
            },
            "key_points": {
                "type": "array",
                "items": { "type": "string" },
                "description": "The most important points, one per entry"
            },
            "document_ids": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Ids of the summarized documents"
            },
            "original_length": {
                "type": "integer",
                "description": "Approximate character length of the source material"
            }
        },
        "required": ["summary"],
        "additionalProperties": false
    })
}

/// Schema for [`CalculationResponse`].
pub fn calculation_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "expression": {
                "type": "string",
                "description": "The arithmetic expression that was evaluated"
            },
            "result": {
                "type": ["number", "null"],
                "description": "The numeric result, or null if none was produced"
            },
            "explanation": {
                "type": "string",
                "description": "How the result was derived"
            },
            "sources": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Document ids the numbers came from"
            }
        },
        "required": ["expression", "explanation"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_prefers_primary_field() {
        let answer = TaskResponse::Answer(AnswerResponse {
            answer: "42".into(),
            sources: BTreeSet::new(),
        });
        assert_eq!(answer.text(), "42");

        let summary = TaskResponse::Summarization(SummarizationResponse {
            summary: "short".into(),
            key_points: vec![],
            document_ids: BTreeSet::new(),
            original_length: 0,
        });
        assert_eq!(summary.text(), "short");

        let calc = TaskResponse::Calculation(CalculationResponse {
            expression: "1+1".into(),
            result: Some(2.0),
            explanation: "sum of one and one".into(),
            sources: BTreeSet::new(),
        });
        assert_eq!(calc.text(), "sum of one and one");
    }

    #[test]
    fn tagged_serialization_uses_kind() {
        let resp = TaskResponse::Answer(AnswerResponse {
            answer: "yes".into(),
            sources: ["INV-001".to_string()].into_iter().collect(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["kind"], "answer");
        assert_eq!(json["answer"], "yes");
    }

    #[test]
    fn calculation_result_accepts_null() {
        let parsed: CalculationResponse = serde_json::from_str(
            r#"{"expression":"sum","result":null,"explanation":"no numbers found"}"#,
        )
        .unwrap();
        assert!(parsed.result.is_none());
    }

    #[test]
    fn source_ids_come_from_the_right_field() {
        let resp = TaskResponse::Summarization(SummarizationResponse {
            summary: "s".into(),
            key_points: vec![],
            document_ids: ["DOC-1".to_string()].into_iter().collect(),
            original_length: 10,
        });
        assert!(resp.source_ids().contains("DOC-1"));
    }
}
