//! Backend implementations - hosted remote procedures and an in-memory stand-in.

mod memory;

#[cfg(feature = "http")]
mod http;

pub use memory::InMemoryBackend;

#[cfg(feature = "http")]
pub use http::{HttpBackend, HttpBackendConfig};
