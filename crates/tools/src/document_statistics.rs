//! Collection statistics tool. Takes no arguments.

use std::sync::Arc;

use async_trait::async_trait;
use paperhound_core::error::ToolError;
use paperhound_core::retrieval::{CollectionStats, Retriever};
use paperhound_core::tool::{Tool, ToolResult};
use serde_json::Value;

use crate::fmt::money;

pub struct DocumentStatisticsTool {
    retriever: Arc<dyn Retriever>,
}

impl DocumentStatisticsTool {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }

    fn render(stats: &CollectionStats) -> String {
        let mut out = format!(
            "Document collection statistics:\n\
             Total documents: {}\n\
             Documents with amounts: {}\n",
            stats.total_documents, stats.documents_with_amounts
        );
        for (doc_type, count) in &stats.by_type {
            out.push_str(&format!("  {doc_type}: {count}\n"));
        }
        out.push_str(&format!(
            "Total amount: {}\nAverage amount: {}\n",
            money(stats.total_amount),
            money(stats.average_amount)
        ));
        if let (Some(min), Some(max)) = (stats.min_amount, stats.max_amount) {
            out.push_str(&format!(
                "Smallest amount: {}\nLargest amount: {}\n",
                money(min),
                money(max)
            ));
        }
        out
    }
}

#[async_trait]
impl Tool for DocumentStatisticsTool {
    fn name(&self) -> &str {
        "document_statistics"
    }

    fn description(&self) -> &str {
        "Get aggregate statistics about the document collection: counts by type and amount totals."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: Value) -> Result<ToolResult, ToolError> {
        match self.retriever.statistics().await {
            Ok(stats) => {
                let data = serde_json::to_value(&stats).map_err(|e| ToolError::ExecutionFailed {
                    tool_name: self.name().to_string(),
                    reason: e.to_string(),
                })?;
                Ok(ToolResult {
                    call_id: String::new(),
                    success: true,
                    output: Self::render(&stats),
                    data: Some(data),
                })
            }
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Statistics unavailable: {e}"),
                data: None,
            }),
        }
    }
}
