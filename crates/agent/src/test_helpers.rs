//! Shared test helpers: a scripted provider and a fixture retriever.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use paperhound_core::error::{ProviderError, RetrievalError};
use paperhound_core::message::{Message, MessageToolCall};
use paperhound_core::provider::{
    Provider, ProviderRequest, ProviderResponse, StructuredRequest, Usage,
};
use paperhound_core::retrieval::{AmountFilter, CollectionStats, DocHit, Document, Retriever};

/// A mock provider that returns scripted responses in order.
///
/// Separate queues for plain and structured completions. Panics if a call
/// arrives with an empty queue.
pub struct SequentialMockProvider {
    completions: Mutex<VecDeque<Result<ProviderResponse, ProviderError>>>,
    structured: Mutex<VecDeque<Result<serde_json::Value, ProviderError>>>,
    complete_calls: Mutex<usize>,
    structured_calls: Mutex<usize>,
}

impl SequentialMockProvider {
    pub fn new() -> Self {
        Self {
            completions: Mutex::new(VecDeque::new()),
            structured: Mutex::new(VecDeque::new()),
            complete_calls: Mutex::new(0),
            structured_calls: Mutex::new(0),
        }
    }

    pub fn completion(self, response: Result<ProviderResponse, ProviderError>) -> Self {
        self.completions.lock().unwrap().push_back(response);
        self
    }

    pub fn structured(self, response: Result<serde_json::Value, ProviderError>) -> Self {
        self.structured.lock().unwrap().push_back(response);
        self
    }

    pub fn complete_calls(&self) -> usize {
        *self.complete_calls.lock().unwrap()
    }

    pub fn structured_calls(&self) -> usize {
        *self.structured_calls.lock().unwrap()
    }
}

#[async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        *self.complete_calls.lock().unwrap() += 1;
        self.completions
            .lock()
            .unwrap()
            .pop_front()
            .expect("SequentialMockProvider: no scripted completion left")
    }

    async fn complete_structured(
        &self,
        _request: StructuredRequest,
    ) -> Result<serde_json::Value, ProviderError> {
        *self.structured_calls.lock().unwrap() += 1;
        self.structured
            .lock()
            .unwrap()
            .pop_front()
            .expect("SequentialMockProvider: no scripted structured response left")
    }
}

/// A simple text response (no tool calls).
pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// A response that requests tool calls.
pub fn make_tool_call_response(tool_calls: Vec<MessageToolCall>, thought: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(thought).with_tool_calls(tool_calls),
        usage: None,
        model: "mock-model".into(),
    }
}

pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> MessageToolCall {
    MessageToolCall {
        id: id.into(),
        name: name.into(),
        arguments: arguments.to_string(),
    }
}

/// Fixed three-document collection for handler and assistant tests.
#[derive(Default)]
pub struct FixtureRetriever;

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
            preview: doc.content.clone(),
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
        let q = query.to_lowercase();
        Ok(Self::docs()
            .iter()
            .filter(|d| {
                d.title.to_lowercase().contains(&q)
                    || d.content.to_lowercase().contains(&q)
                    || q.split_whitespace()
                        .any(|w| d.content.to_lowercase().contains(w))
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
