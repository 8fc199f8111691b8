//! Remote-procedure call envelope and argument shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only queries and state-changing mutations use different endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Query,
    Mutation,
}

impl FunctionKind {
    /// Endpoint path relative to the deployment URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            FunctionKind::Query => "/api/query",
            FunctionKind::Mutation => "/api/mutation",
        }
    }
}

/// Named backend functions the client calls.
pub mod functions {
    pub const GET_USER_DRAFT: &str = "posts:getUserDraft";
    pub const GET_USER_POSTS: &str = "posts:getUserPosts";
    pub const GET_POST: &str = "posts:getPost";
    pub const CREATE_POST: &str = "posts:create";
    pub const UPDATE_POST: &str = "posts:update";
    pub const DELETE_POST: &str = "posts:deletePost";
    pub const GET_CURRENT_USER: &str = "users:getCurrentUser";
    pub const UPDATE_USERNAME: &str = "users:updateUsername";
}

/// Request body posted to a function endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub path: String,
    pub args: Value,
    pub format: String,
}

impl FunctionCall {
    pub fn new(path: impl Into<String>, args: Value) -> Self {
        Self {
            path: path.into(),
            args,
            format: "json".to_string(),
        }
    }

    /// Serialize typed arguments into the envelope.
    pub fn with_args<A: Serialize>(path: impl Into<String>, args: &A) -> serde_json::Result<Self> {
        Ok(Self::new(path, serde_json::to_value(args)?))
    }
}

/// Arguments of functions that take nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoArgs {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdArgs {
    pub id: String,
}

/// `update` takes the id alongside the flattened payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostArgs<P> {
    pub id: String,
    #[serde(flatten)]
    pub payload: P,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUsernameArgs {
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_args_flatten_payload() {
        let args = UpdatePostArgs {
            id: "p1".to_string(),
            payload: json!({ "title": "Hello", "tags": [] }),
        };

        let call = FunctionCall::with_args(functions::UPDATE_POST, &args).unwrap();

        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "path": "posts:update",
                "args": { "id": "p1", "title": "Hello", "tags": [] },
                "format": "json",
            })
        );
    }

    #[test]
    fn test_no_args_is_empty_object() {
        let call = FunctionCall::with_args(functions::GET_USER_DRAFT, &NoArgs {}).unwrap();
        assert_eq!(call.args, json!({}));
        assert_eq!(FunctionKind::Query.endpoint(), "/api/query");
    }
}
