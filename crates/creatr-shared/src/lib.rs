//! # Creatr Shared
//!
//! Wire types exchanged with the hosted backend's remote-procedure endpoint.

pub mod dto;
pub mod response;

pub use dto::{FunctionCall, FunctionKind};
pub use response::{CallStatus, RemoteResponse, ResponseError};
