//! Document retrieval contract.
//!
//! The engine only depends on this trait; concrete backends (a vector
//! store, a search service) are supplied by the embedding application.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// A full document as stored in the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub title: String,
    pub content: String,
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// A search hit: document metadata plus a relevance score and preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocHit {
    pub doc_id: String,
    pub title: String,
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub relevance: f32,
    pub preview: String,
}

/// Amount comparison for filtered searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountFilter {
    Over(f64),
    Under(f64),
    Between(f64, f64),
    Exact(f64),
    Approximate(f64),
}

/// Aggregate statistics over the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_documents: u64,
    pub documents_with_amounts: u64,
    pub by_type: BTreeMap<String, u64>,
    pub total_amount: f64,
    pub average_amount: f64,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

/// Trait implemented by document retrieval backends.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Keyword search over titles and content.
    async fn search_keyword(&self, query: &str, limit: usize)
        -> Result<Vec<DocHit>, RetrievalError>;

    /// All documents of a given type.
    async fn search_type(&self, doc_type: &str, limit: usize)
        -> Result<Vec<DocHit>, RetrievalError>;

    /// Documents whose amount satisfies the filter.
    async fn search_amount(
        &self,
        filter: AmountFilter,
        limit: usize,
    ) -> Result<Vec<DocHit>, RetrievalError>;

    /// Full document by id, or `Ok(None)` when absent.
    async fn read(&self, doc_id: &str) -> Result<Option<Document>, RetrievalError>;

    /// Collection-wide statistics.
    async fn statistics(&self) -> Result<CollectionStats, RetrievalError>;
}

impl AmountFilter {
    /// Whether `amount` satisfies this filter. `Approximate` allows a
    /// 10 percent band around the target.
    pub fn matches(&self, amount: f64) -> bool {
        match *self {
            AmountFilter::Over(min) => amount > min,
            AmountFilter::Under(max) => amount < max,
            AmountFilter::Between(lo, hi) => amount >= lo && amount <= hi,
            AmountFilter::Exact(target) => (amount - target).abs() < f64::EPSILON,
            AmountFilter::Approximate(target) => {
                let band = target.abs() * 0.10;
                (amount - target).abs() <= band
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_and_under_are_strict() {
        assert!(AmountFilter::Over(100.0).matches(100.01));
        assert!(!AmountFilter::Over(100.0).matches(100.0));
        assert!(AmountFilter::Under(50.0).matches(49.99));
        assert!(!AmountFilter::Under(50.0).matches(50.0));
    }

    #[test]
    fn between_is_inclusive() {
        let f = AmountFilter::Between(10.0, 20.0);
        assert!(f.matches(10.0));
        assert!(f.matches(20.0));
        assert!(!f.matches(20.01));
    }

    #[test]
    fn approximate_allows_ten_percent() {
        let f = AmountFilter::Approximate(1000.0);
        assert!(f.matches(950.0));
        assert!(f.matches(1100.0));
        assert!(!f.matches(1101.0));
    }
}
