//! Model provider implementations for Paperhound.
//!
//! All providers implement the `paperhound_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
