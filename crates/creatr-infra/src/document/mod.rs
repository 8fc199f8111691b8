//! Rich-text document implementations.

mod memory;

pub use memory::InMemoryDocument;
