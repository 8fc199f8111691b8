//! Error types shared by the controllers.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use validator::ValidationErrors;

/// Failures reported by the remote backend or the transport in front of it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The backend refused the call and said why.
    #[error("{0}")]
    Rejected(String),

    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Post not found")]
    NotFound,

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// The message the backend attached to a rejection, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected(msg) if !msg.trim().is_empty() => Some(msg),
            _ => None,
        }
    }
}

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// First message recorded for `field`.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Fold another set of errors into this one.
    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Errors returned by the editor's submission actions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    #[error("Please select a date and time to schedule")]
    ScheduleMissing,

    /// The editor was unmounted or its post was published.
    #[error("Editor is closed")]
    Closed,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}
