//! Demo document collection backing the CLI.
//!
//! A fixed in-memory corpus of invoices, contracts, and claims so the binary
//! runs without external infrastructure. Real deployments implement
//! `Retriever` against their own store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use paperhound_core::error::RetrievalError;
use paperhound_core::retrieval::{AmountFilter, CollectionStats, DocHit, Document, Retriever};

pub struct DemoRetriever {
    docs: Vec<Document>,
}

impl DemoRetriever {
    pub fn new() -> Self {
        Self {
            docs: vec![
                Document {
                    doc_id: "INV-001".into(),
                    title: "Office Supplies Invoice - March".into(),
                    content: "Invoice INV-001 from OfficeMart for office supplies: paper, \
                              toner, and desk accessories. Total due: $1,200.00. Payment \
                              terms: net 30."
                        .into(),
                    doc_type: "invoice".into(),
                    amount: Some(1200.0),
                },
                Document {
                    doc_id: "INV-002".into(),
                    title: "Consulting Services Invoice - Q1".into(),
                    content: "Invoice INV-002 from Acme Consulting for Q1 advisory \
                              services, 85 hours at $100/hour. Total due: $8,500.00."
                        .into(),
                    doc_type: "invoice".into(),
                    amount: Some(8500.0),
                },
                Document {
                    doc_id: "INV-003".into(),
                    title: "Cloud Hosting Invoice - April".into(),
                    content: "Invoice INV-003 for April cloud hosting and bandwidth. \
                              Total due: $3,750.25."
                        .into(),
                    doc_type: "invoice".into(),
                    amount: Some(3750.25),
                },
                Document {
                    doc_id: "CON-001".into(),
                    title: "Annual Service Contract - Facilities".into(),
                    content: "Contract CON-001 with BrightClean for facilities services, \
                              twelve months starting January. Annual value: $25,000.00. \
                              Termination requires 60 days notice."
                        .into(),
                    doc_type: "contract".into(),
                    amount: Some(25000.0),
                },
                Document {
                    doc_id: "CON-002".into(),
                    title: "Software License Agreement".into(),
                    content: "Contract CON-002 licensing the Ledgerly accounting suite \
                              for 50 seats. Annual fee: $12,000.00, renews automatically."
                        .into(),
                    doc_type: "contract".into(),
                    amount: Some(12000.0),
                },
                Document {
                    doc_id: "CLM-001".into(),
                    title: "Insurance Claim - Water Damage".into(),
                    content: "Claim CLM-001 for water damage to the server room filed in \
                              February. Claimed amount: $18,300.00. Status: under review."
                        .into(),
                    doc_type: "claim".into(),
                    amount: Some(18300.0),
                },
                Document {
                    doc_id: "CLM-002".into(),
                    title: "Warranty Claim - Laptop Fleet".into(),
                    content: "Claim CLM-002 against the laptop fleet warranty, covering \
                              seven units with failed batteries. Claimed amount: $4,900.00."
                        .into(),
                    doc_type: "claim".into(),
                    amount: Some(4900.0),
                },
                Document {
                    doc_id: "MEM-001".into(),
                    title: "Procurement Policy Memo".into(),
                    content: "Memo on procurement policy: purchases over $5,000 require \
                              two approvals; contracts over $20,000 require legal review."
                        .into(),
                    doc_type: "memo".into(),
                    amount: None,
                },
            ],
        }
    }

    fn to_hit(doc: &Document, relevance: f32) -> DocHit {
        DocHit {
            doc_id: doc.doc_id.clone(),
            title: doc.title.clone(),
            doc_type: doc.doc_type.clone(),
            amount: doc.amount,
            relevance,
            preview: doc.content.chars().take(120).collect(),
        }
    }
}

impl Default for DemoRetriever {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Retriever for DemoRetriever {
    async fn search_keyword(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<DocHit>, RetrievalError> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f32, &Document)> = self
            .docs
            .iter()
            .filter_map(|doc| {
                let haystack = format!("{} {}", doc.title, doc.content).to_lowercase();
                let matched = terms.iter().filter(|t| haystack.contains(*t)).count();
                if matched == 0 {
                    None
                } else {
                    Some((matched as f32 / terms.len() as f32, doc))
                }
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(score, doc)| Self::to_hit(doc, score))
            .collect())
    }

    async fn search_type(
        &self,
        doc_type: &str,
        limit: usize,
    ) -> Result<Vec<DocHit>, RetrievalError> {
        Ok(self
            .docs
            .iter()
            .filter(|d| d.doc_type.eq_ignore_ascii_case(doc_type))
            .take(limit)
            .map(|d| Self::to_hit(d, 1.0))
            .collect())
    }

    async fn search_amount(
        &self,
        filter: AmountFilter,
        limit: usize,
    ) -> Result<Vec<DocHit>, RetrievalError> {
        Ok(self
            .docs
            .iter()
            .filter(|d| d.amount.is_some_and(|a| filter.matches(a)))
            .take(limit)
            .map(|d| Self::to_hit(d, 1.0))
            .collect())
    }

    async fn read(&self, doc_id: &str) -> Result<Option<Document>, RetrievalError> {
        Ok(self.docs.iter().find(|d| d.doc_id == doc_id).cloned())
    }

    async fn statistics(&self) -> Result<CollectionStats, RetrievalError> {
        let amounts: Vec<f64> = self.docs.iter().filter_map(|d| d.amount).collect();
        let total: f64 = amounts.iter().sum();
        let mut by_type = BTreeMap::new();
        for d in &self.docs {
            *by_type.entry(d.doc_type.clone()).or_insert(0u64) += 1;
        }
        Ok(CollectionStats {
            total_documents: self.docs.len() as u64,
            documents_with_amounts: amounts.len() as u64,
            by_type,
            total_amount: total,
            average_amount: if amounts.is_empty() {
                0.0
            } else {
                total / amounts.len() as f64
            },
            min_amount: amounts.iter().copied().reduce(f64::min),
            max_amount: amounts.iter().copied().reduce(f64::max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keyword_search_ranks_by_term_overlap() {
        let retriever = DemoRetriever::new();
        let hits = retriever.search_keyword("consulting invoice", 5).await.unwrap();
        assert_eq!(hits[0].doc_id, "INV-002");
    }

    #[tokio::test]
    async fn type_search_finds_claims() {
        let retriever = DemoRetriever::new();
        let hits = retriever.search_type("claim", 10).await.unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn amount_search_respects_filter() {
        let retriever = DemoRetriever::new();
        let hits = retriever
            .search_amount(AmountFilter::Over(10000.0), 10)
            .await
            .unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h.doc_id.as_str()).collect();
        assert!(ids.contains(&"CON-001"));
        assert!(ids.contains(&"CLM-001"));
        assert!(!ids.contains(&"INV-001"));
    }

    #[tokio::test]
    async fn statistics_skip_docs_without_amounts() {
        let retriever = DemoRetriever::new();
        let stats = retriever.statistics().await.unwrap();
        assert_eq!(stats.total_documents, 8);
        assert_eq!(stats.documents_with_amounts, 7);
    }
}
