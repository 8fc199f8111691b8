//! Dashboard chrome (sidebar) and the create/edit page entry points.

use std::sync::Arc;

use crate::domain::{PostId, Route};
use crate::editor::{EditorConfig, EditorMode, EditorServices, PostEditor};
use crate::error::RemoteError;
use crate::ports::UserService;

/// One sidebar link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub label: &'static str,
    pub route: Route,
    pub active: bool,
    /// Shows the "Draft" badge.
    pub badge: bool,
}

const SIDEBAR: [(&str, Route); 5] = [
    ("Dashboard", Route::Dashboard),
    ("Create Post", Route::Create),
    ("My Posts", Route::Posts),
    ("Followers", Route::Followers),
    ("Settings", Route::Settings),
];

/// Sidebar state owned by the dashboard layout.
#[derive(Debug, Clone, Default)]
pub struct DashboardShell {
    sidebar_open: bool,
    has_draft: bool,
}

impl DashboardShell {
    pub fn new(has_draft: bool) -> Self {
        Self {
            sidebar_open: false,
            has_draft,
        }
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn set_has_draft(&mut self, has_draft: bool) {
        self.has_draft = has_draft;
    }

    /// `/dashboard` only matches itself; every other entry also matches
    /// its sub-paths.
    pub fn is_active(pathname: &str, route: &Route) -> bool {
        let href = route.path();
        pathname == href || (href != Route::Dashboard.path() && pathname.starts_with(&href))
    }

    pub fn items(&self, pathname: &str) -> Vec<SidebarItem> {
        SIDEBAR
            .iter()
            .map(|(label, route)| SidebarItem {
                label: *label,
                route: route.clone(),
                active: Self::is_active(pathname, route),
                badge: self.has_draft && *route == Route::Create,
            })
            .collect()
    }

    /// Follow a sidebar link; the sidebar closes behind it.
    pub fn navigate(&mut self, route: Route, services: &EditorServices) {
        self.close_sidebar();
        services.navigator.push(route);
    }
}

/// What the create route renders.
pub enum CreatePage {
    /// The user has to pick a username first; links to settings.
    UsernameRequired,
    Editor(PostEditor),
}

impl CreatePage {
    pub fn settings_route() -> Route {
        Route::Settings
    }
}

/// Load the user and any outstanding draft, then mount a create-mode editor.
///
/// Must be called from within a tokio runtime.
pub async fn open_create_page(
    users: &Arc<dyn UserService>,
    services: EditorServices,
    config: EditorConfig,
) -> Result<CreatePage, RemoteError> {
    let user = users.get_current_user().await?;
    if !user.as_ref().is_some_and(|u| u.has_username()) {
        tracing::debug!("Create page blocked until a username is set");
        return Ok(CreatePage::UsernameRequired);
    }

    let draft = services.posts.get_user_draft().await?;
    tracing::debug!(resumed = draft.is_some(), "Opening create page");
    Ok(CreatePage::Editor(PostEditor::mount(
        EditorMode::Create,
        draft.as_ref(),
        services,
        config,
    )))
}

/// Load a post and mount an edit-mode editor on it.
pub async fn open_edit_page(
    id: &PostId,
    services: EditorServices,
    config: EditorConfig,
) -> Result<PostEditor, RemoteError> {
    let post = services
        .posts
        .get_post(id)
        .await?
        .ok_or(RemoteError::NotFound)?;
    Ok(PostEditor::mount(
        EditorMode::Edit,
        Some(&post),
        services,
        config,
    ))
}
