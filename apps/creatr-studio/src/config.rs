//! Studio configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use creatr_core::EditorConfig;

#[cfg(feature = "http")]
use creatr_infra::HttpBackendConfig;

/// Where posts and users live.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Process-local store with one signed-in user.
    InMemory { username: Option<String> },
    #[cfg(feature = "http")]
    Http(HttpBackendConfig),
}

/// Studio configuration.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub backend: BackendConfig,
    pub autosave_period: Duration,
}

impl StudioConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            backend: Self::backend_from_env(),
            autosave_period: Duration::from_secs(
                env::var("CREATR_AUTOSAVE_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(30),
            ),
        }
    }

    #[cfg(feature = "http")]
    fn backend_from_env() -> BackendConfig {
        match env::var("CREATR_BACKEND_URL") {
            Ok(url) if !url.is_empty() => BackendConfig::Http(HttpBackendConfig::from_env()),
            _ => Self::in_memory_from_env(),
        }
    }

    #[cfg(not(feature = "http"))]
    fn backend_from_env() -> BackendConfig {
        Self::in_memory_from_env()
    }

    fn in_memory_from_env() -> BackendConfig {
        BackendConfig::InMemory {
            username: env::var("CREATR_USERNAME").ok().filter(|u| !u.is_empty()),
        }
    }

    pub fn editor(&self) -> EditorConfig {
        EditorConfig::default().with_autosave_period(self.autosave_period)
    }
}
