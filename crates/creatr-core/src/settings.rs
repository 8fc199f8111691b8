//! Account settings: choosing a username.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::domain::CurrentUser;
use crate::error::RemoteError;
use crate::ports::{Notifier, UserService};

const EMPTY_USERNAME: &str = "Username cannot be empty";
const GENERIC_UPDATE_ERROR: &str = "Failed to update username";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[derive(Default)]
struct SettingsState {
    user: Option<CurrentUser>,
    input: String,
    saving: bool,
}

/// The settings screen. Only a non-empty check runs locally; format and
/// uniqueness are the backend's call.
pub struct SettingsPage {
    users: Arc<dyn UserService>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SettingsState>,
}

impl SettingsPage {
    pub fn new(users: Arc<dyn UserService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            users,
            notifier,
            state: Mutex::new(SettingsState::default()),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, SettingsState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch the current user and prefill the input with their username.
    pub async fn load(&self) -> Result<Option<CurrentUser>, RemoteError> {
        let user = self.users.get_current_user().await?;
        let mut state = self.state();
        state.input = user
            .as_ref()
            .and_then(|u| u.username.clone())
            .unwrap_or_default();
        state.user = user.clone();
        Ok(user)
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.state().user.clone()
    }

    pub fn username_input(&self) -> String {
        self.state().input.clone()
    }

    pub fn set_username_input(&self, value: impl Into<String>) {
        self.state().input = value.into();
    }

    pub fn is_saving(&self) -> bool {
        self.state().saving
    }

    pub async fn submit(&self) -> Result<String, SettingsError> {
        let username = self.state().input.trim().to_string();
        if username.is_empty() {
            self.notifier.error(EMPTY_USERNAME);
            return Err(SettingsError::EmptyUsername);
        }

        self.state().saving = true;
        let result = self.users.update_username(&username).await;
        let mut state = self.state();
        state.saving = false;

        match result {
            Ok(()) => {
                if let Some(user) = state.user.as_mut() {
                    user.username = Some(username.clone());
                }
                state.input = username.clone();
                drop(state);
                tracing::info!(%username, "Username updated");
                self.notifier.success("Username updated successfully!");
                Ok(username)
            }
            Err(err) => {
                drop(state);
                tracing::error!(error = %err, "Username update failed");
                self.notifier
                    .error(err.backend_message().unwrap_or(GENERIC_UPDATE_ERROR));
                Err(err.into())
            }
        }
    }
}
