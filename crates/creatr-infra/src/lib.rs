//! # Creatr Infrastructure
//!
//! Concrete implementations of the ports defined in `creatr-core`.
//!
//! ## Feature Flags
//!
//! - `http` (default) - remote-procedure backend over HTTP via reqwest
//!
//! Without `http` only the in-memory adapters are built.

pub mod document;
pub mod feedback;
pub mod remote;

// Re-exports - In-Memory
pub use document::InMemoryDocument;
pub use feedback::{HistoryNavigator, RecordingNotifier};
pub use remote::InMemoryBackend;

// Re-exports - HTTP
#[cfg(feature = "http")]
pub use remote::{HttpBackend, HttpBackendConfig};
