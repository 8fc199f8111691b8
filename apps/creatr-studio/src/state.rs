//! Application state - the services every screen is wired to.

use std::sync::Arc;

use creatr_core::EditorConfig;
use creatr_core::domain::CurrentUser;
use creatr_core::editor::EditorServices;
use creatr_core::ports::{PostService, UserService};
use creatr_infra::InMemoryBackend;

#[cfg(feature = "http")]
use creatr_infra::HttpBackend;

use crate::config::{BackendConfig, StudioConfig};
use crate::output::OutputSink;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostService>,
    pub users: Arc<dyn UserService>,
    pub sink: Arc<OutputSink>,
    pub editor_config: EditorConfig,
}

impl AppState {
    /// Build the application state with the configured backend.
    pub fn new(config: &StudioConfig, sink: Arc<OutputSink>) -> anyhow::Result<Self> {
        let (posts, users): (Arc<dyn PostService>, Arc<dyn UserService>) = match &config.backend {
            BackendConfig::InMemory { username } => {
                tracing::warn!("CREATR_BACKEND_URL not set. Running against the in-memory backend.");
                let mut user = CurrentUser::new("local-user", "Local Writer", "writer@localhost");
                if let Some(name) = username {
                    user = user.with_username(name);
                }
                let backend = Arc::new(InMemoryBackend::with_user(user));
                (backend.clone(), backend)
            }
            #[cfg(feature = "http")]
            BackendConfig::Http(http) => {
                let backend = Arc::new(HttpBackend::new(http.clone())?);
                (backend.clone(), backend)
            }
        };

        tracing::info!(
            autosave_secs = config.autosave_period.as_secs(),
            "Application state initialized"
        );

        Ok(Self {
            posts,
            users,
            sink,
            editor_config: config.editor(),
        })
    }

    pub fn editor_services(&self) -> EditorServices {
        EditorServices {
            posts: self.posts.clone(),
            notifier: self.sink.clone(),
            navigator: self.sink.clone(),
        }
    }
}
