//! Response envelope returned by function endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Error,
}

/// `{ "status": "success", "value": ... }` or
/// `{ "status": "error", "errorMessage": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResponse {
    pub status: CallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// The function ran and threw; the message is meant for the user.
    #[error("{0}")]
    Failed(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl RemoteResponse {
    pub fn success(value: Value) -> Self {
        Self {
            status: CallStatus::Success,
            value: Some(value),
            error_message: None,
            error_data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CallStatus::Error,
            value: None,
            error_message: Some(message.into()),
            error_data: None,
        }
    }

    /// Unwrap the envelope into the function's typed return value.
    ///
    /// A missing `value` decodes as JSON `null`, so `()` and `Option<T>`
    /// returns work for functions that return nothing.
    pub fn into_result<T: serde::de::DeserializeOwned>(self) -> Result<T, ResponseError> {
        match self.status {
            CallStatus::Success => {
                let value = self.value.unwrap_or(Value::Null);
                serde_json::from_value(value).map_err(|e| ResponseError::Decode(e.to_string()))
            }
            CallStatus::Error => Err(ResponseError::Failed(
                self.error_message.unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_decodes_value() {
        let response: RemoteResponse =
            serde_json::from_value(json!({ "status": "success", "value": "k1" })).unwrap();

        assert_eq!(response.into_result::<String>(), Ok("k1".to_string()));
    }

    #[test]
    fn test_null_value_is_none() {
        let response: RemoteResponse =
            serde_json::from_value(json!({ "status": "success", "value": null })).unwrap();

        assert_eq!(response.into_result::<Option<String>>(), Ok(None));
    }

    #[test]
    fn test_error_carries_message() {
        let response: RemoteResponse = serde_json::from_value(
            json!({ "status": "error", "errorMessage": "Username is already taken" }),
        )
        .unwrap();

        assert_eq!(
            response.into_result::<()>(),
            Err(ResponseError::Failed("Username is already taken".to_string()))
        );
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let response = RemoteResponse::success(json!({ "unexpected": true }));
        assert!(matches!(
            response.into_result::<Vec<String>>(),
            Err(ResponseError::Decode(_))
        ));
    }
}
