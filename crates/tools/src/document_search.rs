//! Document search tool.
//!
//! Dispatches to the configured retriever. Three search modes: keyword,
//! document type, and amount filtering. Hits are rendered as text with one
//! `(ID: <doc_id>)` marker per document so downstream consumers can pull
//! document ids back out of the transcript.

use std::sync::Arc;

use async_trait::async_trait;
use paperhound_core::error::ToolError;
use paperhound_core::retrieval::{AmountFilter, DocHit, Retriever};
use paperhound_core::tool::{Tool, ToolResult};
use serde_json::Value;
use tracing::debug;

use crate::fmt::money;

const DEFAULT_LIMIT: usize = 5;

pub struct DocumentSearchTool {
    retriever: Arc<dyn Retriever>,
}

impl DocumentSearchTool {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }

    fn amount_filter(arguments: &Value) -> Result<AmountFilter, ToolError> {
        let amount = arguments.get("amount").and_then(Value::as_f64);
        let min = arguments.get("min_amount").and_then(Value::as_f64);
        let max = arguments.get("max_amount").and_then(Value::as_f64);
        let comparison = arguments
            .get("comparison")
            .and_then(Value::as_str)
            .unwrap_or("over");

        match comparison {
            "between" => match (min, max) {
                (Some(lo), Some(hi)) => Ok(AmountFilter::Between(lo, hi)),
                _ => Err(ToolError::InvalidArguments(
                    "'between' requires min_amount and max_amount".into(),
                )),
            },
            other => {
                let target = amount.ok_or_else(|| {
                    ToolError::InvalidArguments(format!("'{other}' requires an amount"))
                })?;
                match other {
                    "over" => Ok(AmountFilter::Over(target)),
                    "under" => Ok(AmountFilter::Under(target)),
                    "exact" => Ok(AmountFilter::Exact(target)),
                    "approximate" => Ok(AmountFilter::Approximate(target)),
                    _ => Err(ToolError::InvalidArguments(format!(
                        "unknown comparison '{other}'"
                    ))),
                }
            }
        }
    }

    fn render_hits(hits: &[DocHit]) -> String {
        if hits.is_empty() {
            return "No documents found matching your search criteria.".to_string();
        }

        let mut out = format!("Found {} document(s):\n", hits.len());
        for hit in hits {
            let amount = hit
                .amount
                .map(|a| format!(", {}", money(a)))
                .unwrap_or_default();
            out.push_str(&format!(
                "- {} (ID: {}) [{}{}]\n  {}\n",
                hit.title, hit.doc_id, hit.doc_type, amount, hit.preview
            ));
        }
        out
    }
}

#[async_trait]
impl Tool for DocumentSearchTool {
    fn name(&self) -> &str {
        "document_search"
    }

    fn description(&self) -> &str {
        "Search the document collection by keyword, document type, or amount. \
         Returns matching documents with their ids, types, and amounts."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Keywords to search for in titles and content"
                },
                "search_type": {
                    "type": "string",
                    "enum": ["keyword", "type", "amount", "amount_range"],
                    "description": "How to search. Defaults to keyword."
                },
                "doc_type": {
                    "type": "string",
                    "description": "Document type to filter by, e.g. 'invoice' or 'contract'"
                },
                "comparison": {
                    "type": "string",
                    "enum": ["over", "under", "between", "exact", "approximate"],
                    "description": "Amount comparison for amount searches"
                },
                "amount": {
                    "type": "number",
                    "description": "Target amount for over/under/exact/approximate comparisons"
                },
                "min_amount": {
                    "type": "number",
                    "description": "Lower bound for between/amount_range searches"
                },
                "max_amount": {
                    "type": "number",
                    "description": "Upper bound for between/amount_range searches"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;
        let search_type = arguments
            .get("search_type")
            .and_then(Value::as_str)
            .unwrap_or("keyword");

        debug!(query, search_type, "running document search");

        let hits = match search_type {
            "type" => {
                let doc_type = arguments
                    .get("doc_type")
                    .and_then(Value::as_str)
                    .unwrap_or(query);
                self.retriever.search_type(doc_type, DEFAULT_LIMIT).await
            }
            "amount" => {
                let filter = Self::amount_filter(&arguments)?;
                self.retriever.search_amount(filter, DEFAULT_LIMIT).await
            }
            "amount_range" => {
                let min = arguments.get("min_amount").and_then(Value::as_f64);
                let max = arguments.get("max_amount").and_then(Value::as_f64);
                match (min, max) {
                    (Some(lo), Some(hi)) => {
                        self.retriever
                            .search_amount(AmountFilter::Between(lo, hi), DEFAULT_LIMIT)
                            .await
                    }
                    _ => {
                        return Err(ToolError::InvalidArguments(
                            "'amount_range' requires min_amount and max_amount".into(),
                        ))
                    }
                }
            }
            _ => self.retriever.search_keyword(query, DEFAULT_LIMIT).await,
        };

        match hits {
            Ok(hits) => {
                let data = serde_json::to_value(&hits)
                    .map_err(|e| ToolError::ExecutionFailed {
                        tool_name: self.name().to_string(),
                        reason: e.to_string(),
                    })?;
                Ok(ToolResult {
                    call_id: String::new(),
                    success: true,
                    output: Self::render_hits(&hits),
                    data: Some(data),
                })
            }
            // Retriever failures come back to the model as text, not as
            // an aborted turn.
            Err(e) => Ok(ToolResult {
                call_id: String::new(),
                success: false,
                output: format!("Search failed: {e}"),
                data: None,
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use paperhound_core::error::RetrievalError;
    use paperhound_core::retrieval::{CollectionStats, Document};
    use std::collections::BTreeMap;

    /// A small fixed document collection for tool tests.
    #[derive(Default)]
    pub(crate) struct FixtureRetriever {
        pub fail: bool,
    }

    impl FixtureRetriever {
        fn docs() -> Vec<Document> {
            vec![
                Document {
                    doc_id: "INV-001".into(),
                    title: "Office Supplies Invoice".into(),
                    content: "Invoice for office supplies totaling $1,200.00.".into(),
                    doc_type: "invoice".into(),
                    amount: Some(1200.0),
                },
                Document {
                    doc_id: "INV-002".into(),
                    title: "Consulting Invoice".into(),
                    content: "Invoice for consulting services, $8,500.00.".into(),
                    doc_type: "invoice".into(),
                    amount: Some(8500.0),
                },
                Document {
                    doc_id: "CON-001".into(),
                    title: "Service Contract".into(),
                    content: "Annual service contract worth $25,000.00.".into(),
                    doc_type: "contract".into(),
                    amount: Some(25000.0),
                },
            ]
        }

        fn to_hit(doc: &Document) -> DocHit {
            DocHit {
                doc_id: doc.doc_id.clone(),
                title: doc.title.clone(),
                doc_type: doc.doc_type.clone(),
                amount: doc.amount,
                relevance: 1.0,
                preview: doc.content.chars().take(80).collect(),
            }
        }
    }

    #[async_trait]
    impl Retriever for FixtureRetriever {
        async fn search_keyword(
            &self,
            query: &str,
            limit: usize,
        ) -> Result<Vec<DocHit>, RetrievalError> {
            if self.fail {
                return Err(RetrievalError::Unavailable("backend down".into()));
            }
            let q = query.to_lowercase();
            Ok(Self::docs()
                .iter()
                .filter(|d| {
                    d.title.to_lowercase().contains(&q) || d.content.to_lowercase().contains(&q)
                })
                .take(limit)
                .map(Self::to_hit)
                .collect())
        }

        async fn search_type(
            &self,
            doc_type: &str,
            limit: usize,
        ) -> Result<Vec<DocHit>, RetrievalError> {
            Ok(Self::docs()
                .iter()
                .filter(|d| d.doc_type == doc_type)
                .take(limit)
                .map(Self::to_hit)
                .collect())
        }

        async fn search_amount(
            &self,
            filter: AmountFilter,
            limit: usize,
        ) -> Result<Vec<DocHit>, RetrievalError> {
            Ok(Self::docs()
                .iter()
                .filter(|d| d.amount.is_some_and(|a| filter.matches(a)))
                .take(limit)
                .map(Self::to_hit)
                .collect())
        }

        async fn read(&self, doc_id: &str) -> Result<Option<Document>, RetrievalError> {
            Ok(Self::docs().into_iter().find(|d| d.doc_id == doc_id))
        }

        async fn statistics(&self) -> Result<CollectionStats, RetrievalError> {
            let docs = Self::docs();
            let amounts: Vec<f64> = docs.iter().filter_map(|d| d.amount).collect();
            let total: f64 = amounts.iter().sum();
            let mut by_type = BTreeMap::new();
            for d in &docs {
                *by_type.entry(d.doc_type.clone()).or_insert(0u64) += 1;
            }
            Ok(CollectionStats {
                total_documents: docs.len() as u64,
                documents_with_amounts: amounts.len() as u64,
                by_type,
                total_amount: total,
                average_amount: total / amounts.len() as f64,
                min_amount: amounts.iter().copied().reduce(f64::min),
                max_amount: amounts.iter().copied().reduce(f64::max),
            })
        }
    }

    #[tokio::test]
    async fn keyword_search_embeds_doc_ids() {
        let tool = DocumentSearchTool::new(Arc::new(FixtureRetriever::default()));
        let result = tool
            .execute(serde_json::json!({"query": "invoice"}))
            .await
            .unwrap();
        assert!(result.success);
        assert!(result.output.starts_with("Found 2 document(s):"));
        assert!(result.output.contains("(ID: INV-001)"));
        assert!(result.output.contains("(ID: INV-002)"));
    }

    #[tokio::test]
    async fn type_search_filters_by_doc_type() {
        let tool = DocumentSearchTool::new(Arc::new(FixtureRetriever::default()));
        let result = tool
            .execute(serde_json::json!({
                "query": "contracts",
                "search_type": "type",
                "doc_type": "contract"
            }))
            .await
            .unwrap();
        assert!(result.output.contains("(ID: CON-001)"));
        assert!(!result.output.contains("INV-001"));
    }

    #[tokio::test]
    async fn amount_search_over_threshold() {
        let tool = DocumentSearchTool::new(Arc::new(FixtureRetriever::default()));
        let result = tool
            .execute(serde_json::json!({
                "query": "large invoices",
                "search_type": "amount",
                "comparison": "over",
                "amount": 5000.0
            }))
            .await
            .unwrap();
        assert!(result.output.contains("INV-002"));
        assert!(result.output.contains("CON-001"));
        assert!(!result.output.contains("INV-001"));
    }

    #[tokio::test]
    async fn no_hits_gives_fixed_message() {
        let tool = DocumentSearchTool::new(Arc::new(FixtureRetriever::default()));
        let result = tool
            .execute(serde_json::json!({"query": "zebras"}))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(
            result.output,
            "No documents found matching your search criteria."
        );
    }

    #[tokio::test]
    async fn retriever_failure_is_non_fatal() {
        let tool = DocumentSearchTool::new(Arc::new(FixtureRetriever { fail: true }));
        let result = tool
            .execute(serde_json::json!({"query": "anything"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.output.starts_with("Search failed:"));
    }

    #[tokio::test]
    async fn missing_query_is_invalid_arguments() {
        let tool = DocumentSearchTool::new(Arc::new(FixtureRetriever::default()));
        let err = tool.execute(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
