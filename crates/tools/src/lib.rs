//! Document tools for the Paperhound assistant.
//!
//! All tools implement the `paperhound_core::Tool` trait. The retriever-backed
//! tools hold an `Arc<dyn Retriever>` so any backend slots in.

pub mod calculator;
pub mod document_reader;
pub mod document_search;
pub mod document_statistics;
pub mod fmt;
pub mod invoker;
pub mod logger;

use std::sync::Arc;

use paperhound_core::retrieval::Retriever;
use paperhound_core::tool::ToolRegistry;

pub use calculator::CalculatorTool;
pub use document_reader::DocumentReaderTool;
pub use document_search::DocumentSearchTool;
pub use document_statistics::DocumentStatisticsTool;
pub use invoker::ToolInvoker;
pub use logger::{ToolLogEntry, ToolLogger};

/// The standard tool set over a document collection.
pub fn registry_for(retriever: Arc<dyn Retriever>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(DocumentSearchTool::new(retriever.clone())));
    registry.register(Arc::new(DocumentReaderTool::new(retriever.clone())));
    registry.register(Arc::new(DocumentStatisticsTool::new(retriever)));
    registry.register(Arc::new(CalculatorTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_search::tests::FixtureRetriever;

    #[test]
    fn registry_holds_the_four_tools() {
        let registry = registry_for(Arc::new(FixtureRetriever::default()));
        assert_eq!(
            registry.names(),
            vec![
                "calculator",
                "document_reader",
                "document_search",
                "document_statistics",
            ]
        );
    }
}
