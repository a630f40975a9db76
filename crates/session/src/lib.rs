//! Session persistence backends for Paperhound.
//!
//! All stores implement the `paperhound_core::SessionStore` trait.

pub mod file;
pub mod in_memory;

pub use file::FileSessionStore;
pub use in_memory::InMemorySessionStore;
