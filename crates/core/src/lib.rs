//! # Paperhound Core
//!
//! Domain types, traits, and error definitions for the Paperhound document
//! assistant. This crate defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (the language model, the document retriever,
//! the session store, each tool) is defined as a trait here. Implementations
//! live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod intent;
pub mod message;
pub mod provider;
pub mod response;
pub mod retrieval;
pub mod session;
pub mod state;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use intent::{IntentKind, UserIntent};
pub use message::{Message, MessageToolCall, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, StructuredRequest};
pub use response::{AnswerResponse, CalculationResponse, SummarizationResponse, TaskResponse};
pub use retrieval::{AmountFilter, CollectionStats, DocHit, Document, Retriever};
pub use session::{ConversationTurn, SessionState, SessionStore};
pub use state::{AgentState, Step};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
