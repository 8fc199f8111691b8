//! # Creatr Core
//!
//! The client-side domain layer of the Creatr dashboard.
//! Controllers for the post editor, the post listing, settings and the
//! dashboard shell live here, talking to the outside world only through
//! the traits in [`ports`].

pub mod dashboard;
pub mod domain;
pub mod editor;
pub mod error;
pub mod listing;
pub mod ports;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use editor::{EditorConfig, EditorMode, PostEditor};
pub use error::{EditorError, FormErrors, RemoteError};
