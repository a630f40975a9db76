//! Intent-routed task orchestration for the Paperhound assistant.
//!
//! A turn flows through a small state machine: classify the intent, run the
//! matching task handler (one model round with tools, then a
//! schema-constrained finalize call), fold the result into conversation
//! memory, persist. The [`Assistant`] type ties it together for callers.

pub mod assistant;
pub mod classifier;
pub mod handler;
pub mod memory;
pub mod prompts;
pub mod router;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use assistant::{Assistant, ProcessOutcome};
pub use classifier::IntentClassifier;
pub use handler::{TaskHandler, TaskKind};
pub use memory::MemoryManager;
pub use router::{route_intent, Router};
