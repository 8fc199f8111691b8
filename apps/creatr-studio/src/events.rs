//! The line-delimited JSON protocol: UI events in, view updates out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use creatr_core::FormErrors;
use creatr_core::domain::Post;
use creatr_core::editor::UploadTarget;
use creatr_core::listing::{SortKey, StatusFilter};

/// One user interaction, read from a stdin line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiEvent {
    OpenCreate,
    OpenEdit { id: String },
    SetTitle { title: String },
    /// Replace the document body with plain text.
    SetContent { text: String },
    SetCategory { category: String },
    AddTag { tag: String },
    RemoveTag { tag: String },
    SetScheduledFor { value: String },
    OpenImageDialog { target: UploadTarget },
    SelectImage { url: String },
    SaveDraft,
    Publish,
    Schedule,
    CloseEditor,
    ListPosts {
        #[serde(default)]
        search: Option<String>,
        #[serde(default)]
        status: Option<StatusFilter>,
        #[serde(default)]
        sort: Option<SortKey>,
    },
    DeletePost {
        id: String,
        #[serde(default)]
        confirmed: bool,
    },
    DuplicatePost { id: String },
    SetUsername { username: String },
    SubmitUsername,
    ToggleSidebar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    pub label: &'static str,
    pub path: String,
    pub active: bool,
    pub badge: bool,
}

/// A view update, written as one stdout line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Output {
    Toast {
        kind: &'static str,
        message: String,
    },
    Navigate {
        path: String,
    },
    Editor {
        heading: &'static str,
        publish_label: &'static str,
        title: String,
        tags: Vec<String>,
        draft_id: Option<String>,
        autosave: &'static str,
        can_schedule: bool,
    },
    Saved {
        action: &'static str,
        post_id: String,
    },
    Invalid {
        errors: BTreeMap<String, Vec<String>>,
    },
    UsernameRequired {
        settings_path: String,
    },
    Posts {
        posts: Vec<Post>,
        empty_state: Option<&'static str>,
    },
    Sidebar {
        open: bool,
        items: Vec<SidebarEntry>,
    },
    Username {
        username: Option<String>,
    },
    Error {
        message: String,
    },
}

impl Output {
    pub fn invalid(errors: &FormErrors) -> Self {
        Output::Invalid {
            errors: errors
                .iter()
                .map(|(field, messages)| (field.to_string(), messages.to_vec()))
                .collect(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Output::Error {
            message: message.into(),
        }
    }
}
