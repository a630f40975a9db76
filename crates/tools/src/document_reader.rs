//! Document reader tool. Fetches one document in full by id.

use std::sync::Arc;

use async_trait::async_trait;
use paperhound_core::error::ToolError;
use paperhound_core::retrieval::Retriever;
use paperhound_core::tool::{Tool, ToolResult};
use serde_json::Value;

use crate::fmt::money;

pub struct DocumentReaderTool {
    retriever: Arc<dyn Retriever>,
}

impl DocumentReaderTool {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl Tool for DocumentReaderTool {
    fn name(&self) -> &str {
        "document_reader"
    }

    fn description(&self) -> &str {
        "Read the full content of a document by its id."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "doc_id": {
                    "type": "string",
                    "description": "The document id, e.g. 'INV-001'"
                }
            },
            "required": ["doc_id"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<ToolResult, ToolError> {
        let doc_id = arguments["doc_id"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'doc_id' argument".into()))?;

        match self.retriever.read(doc_id).await {
            Ok(Some(doc)) => {
                let amount = doc
                    .amount
                    .map(|a| format!("\nAmount: {}", money(a)))
                    .unwrap_or_default();
                let output = format!(
                    "{} (ID: {}) [{}]{}\n\n{}",
                    doc.title, doc.doc_id, doc.doc_type, amount, doc.content
                );
                let data = serde_json::to_value(&doc).map_err(|e| ToolError::ExecutionFailed {
                    tool_name: self.name().to_string(),
                    reason: e.to_string(),
                })?;
                Ok(ToolResult {
                    call_id: String::new(),
                    success: true,
                    output,
                    data: Some(data),
                })
            }
            Ok(None) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("No document found with id '{doc_id}'."),
                data: None,
            }),
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Read failed: {e}"),
                data: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_search::tests::FixtureRetriever;

    #[tokio::test]
    async fn reads_known_document() {
        let tool = DocumentReaderTool::new(Arc::new(FixtureRetriever::default()));
        let result = tool
            .execute(serde_json::json!({"doc_id": "INV-001"}))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.contains("(ID: INV-001)"));
        assert!(result.output.contains("Amount: $1,200.00"));
        assert!(result.output.contains("office supplies"));
    }

    #[tokio::test]
    async fn unknown_document_is_a_soft_failure() {
        let tool = DocumentReaderTool::new(Arc::new(FixtureRetriever::default()));
        let result = tool
            .execute(serde_json::json!({"doc_id": "MISSING-9"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.output.contains("MISSING-9"));
    }

    #[tokio::test]
    async fn missing_doc_id_is_invalid_arguments() {
        let tool = DocumentReaderTool::new(Arc::new(FixtureRetriever::default()));
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
