//! HTTP backend - calls the hosted backend's named functions over JSON.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use creatr_core::domain::{CurrentUser, Post, PostId, PostPayload};
use creatr_core::error::RemoteError;
use creatr_core::ports::{PostService, UserService};
use creatr_shared::dto::{
    IdArgs, NoArgs, UpdatePostArgs, UpdateUsernameArgs, functions,
};
use creatr_shared::{FunctionCall, FunctionKind, RemoteResponse, ResponseError};

/// HTTP backend configuration.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Deployment URL (e.g., https://happy-otter-123.example.cloud)
    pub base_url: String,
    /// Session token from the identity provider, sent as a bearer token.
    pub auth_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3210".to_string(),
            auth_token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpBackendConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CREATR_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:3210".to_string()),
            auth_token: std::env::var("CREATR_AUTH_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout: Duration::from_secs(
                std::env::var("CREATR_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// Backend reached through `POST {base}/api/query` and `/api/mutation`.
pub struct HttpBackend {
    client: reqwest::Client,
    config: HttpBackendConfig,
}

impl HttpBackend {
    pub fn new(config: HttpBackendConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        tracing::info!(url = %config.base_url, authenticated = config.auth_token.is_some(), "HTTP backend ready");

        Ok(Self { client, config })
    }

    /// Create from environment configuration.
    pub fn from_env() -> Result<Self, RemoteError> {
        Self::new(HttpBackendConfig::from_env())
    }

    fn url(&self, kind: FunctionKind) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), kind.endpoint())
    }

    async fn call<A, T>(&self, kind: FunctionKind, path: &str, args: &A) -> Result<T, RemoteError>
    where
        A: Serialize + Sync,
        T: DeserializeOwned,
    {
        let body = FunctionCall::with_args(path, args)
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        let mut request = self.client.post(self.url(kind)).json(&body);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(function = path, ?kind, "Calling backend");
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Unauthorized);
        }

        // Function errors come back as an envelope too, often with a 4xx/5xx status.
        let envelope: RemoteResponse = match response.json().await {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(RemoteError::Transport(format!("HTTP {status}")));
            }
            Err(e) => return Err(RemoteError::Decode(e.to_string())),
        };

        envelope.into_result().map_err(|e| match e {
            ResponseError::Failed(message) => {
                tracing::debug!(function = path, %message, "Backend function failed");
                RemoteError::Rejected(message)
            }
            ResponseError::Decode(message) => RemoteError::Decode(message),
        })
    }
}

#[async_trait]
impl PostService for HttpBackend {
    async fn get_user_draft(&self) -> Result<Option<Post>, RemoteError> {
        self.call(FunctionKind::Query, functions::GET_USER_DRAFT, &NoArgs {})
            .await
    }

    async fn create_post(&self, payload: PostPayload) -> Result<PostId, RemoteError> {
        self.call(FunctionKind::Mutation, functions::CREATE_POST, &payload)
            .await
    }

    async fn update_post(&self, id: &PostId, payload: PostPayload) -> Result<PostId, RemoteError> {
        let args = UpdatePostArgs {
            id: id.to_string(),
            payload,
        };
        self.call(FunctionKind::Mutation, functions::UPDATE_POST, &args)
            .await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), RemoteError> {
        let args = IdArgs { id: id.to_string() };
        self.call(FunctionKind::Mutation, functions::DELETE_POST, &args)
            .await
    }

    async fn get_user_posts(&self) -> Result<Vec<Post>, RemoteError> {
        self.call(FunctionKind::Query, functions::GET_USER_POSTS, &NoArgs {})
            .await
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, RemoteError> {
        let args = IdArgs { id: id.to_string() };
        self.call(FunctionKind::Query, functions::GET_POST, &args)
            .await
    }
}

#[async_trait]
impl UserService for HttpBackend {
    async fn get_current_user(&self) -> Result<Option<CurrentUser>, RemoteError> {
        self.call(FunctionKind::Query, functions::GET_CURRENT_USER, &NoArgs {})
            .await
    }

    async fn update_username(&self, username: &str) -> Result<(), RemoteError> {
        let args = UpdateUsernameArgs {
            username: username.to_string(),
        };
        self.call(FunctionKind::Mutation, functions::UPDATE_USERNAME, &args)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HttpBackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:3210");
        assert!(config.auth_token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_endpoint_urls_ignore_trailing_slash() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "https://api.example.test/".to_string(),
            ..HttpBackendConfig::default()
        })
        .unwrap();

        assert_eq!(
            backend.url(FunctionKind::Mutation),
            "https://api.example.test/api/mutation"
        );
        assert_eq!(
            backend.url(FunctionKind::Query),
            "https://api.example.test/api/query"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_millis(500),
            ..HttpBackendConfig::default()
        })
        .unwrap();

        let err = backend.get_user_posts().await.unwrap_err();

        assert!(matches!(err, RemoteError::Transport(_)));
        assert_eq!(err.backend_message(), None);
    }
}
