use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the backend.
///
/// `username` stays empty until the user picks one in settings; the create
/// page refuses to open the editor before that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            username: None,
            image_url: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Whether a non-blank username has been set.
    pub fn has_username(&self) -> bool {
        self.username
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}
