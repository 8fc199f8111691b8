//! One user session: routes UI events to the dashboard controllers.

use creatr_core::dashboard::{CreatePage, DashboardShell, open_create_page, open_edit_page};
use creatr_core::domain::PostId;
use creatr_core::editor::{AutosaveState, PostEditor};
use creatr_core::listing::PostsPage;
use creatr_core::settings::SettingsPage;
use creatr_core::EditorError;
use creatr_core::ports::RichTextEditor;
use creatr_infra::InMemoryDocument;

use crate::events::{Output, SidebarEntry, UiEvent};
use crate::state::AppState;

pub struct Session {
    state: AppState,
    editor: Option<PostEditor>,
    shell: DashboardShell,
    posts: PostsPage,
    settings: SettingsPage,
}

impl Session {
    pub fn new(state: AppState) -> Self {
        let posts = PostsPage::new(
            state.posts.clone(),
            state.sink.clone(),
            state.sink.clone(),
        );
        let settings = SettingsPage::new(state.users.clone(), state.sink.clone());
        Self {
            state,
            editor: None,
            shell: DashboardShell::default(),
            posts,
            settings,
        }
    }

    fn emit(&self, output: Output) {
        self.state.sink.emit(&output);
    }

    fn editor(&self) -> Option<&PostEditor> {
        if self.editor.is_none() {
            self.emit(Output::error("No editor is open"));
        }
        self.editor.as_ref()
    }

    /// Handle one event. Failures are reported to the UI, never returned.
    pub async fn dispatch(&mut self, event: UiEvent) {
        tracing::debug!(?event, "UI event");
        match event {
            UiEvent::OpenCreate => self.open_create().await,
            UiEvent::OpenEdit { id } => self.open_edit(PostId::new(id)).await,
            UiEvent::SetTitle { title } => self.edit(|e| e.set_title(title)),
            UiEvent::SetContent { text } => self.edit(|e| {
                let doc = InMemoryDocument::from_text(&text);
                e.set_content(doc.html());
                e.attach_editor(Box::new(doc));
            }),
            UiEvent::SetCategory { category } => self.edit(|e| e.set_category(category)),
            UiEvent::AddTag { tag } => self.edit(|e| {
                e.add_tag(&tag);
            }),
            UiEvent::RemoveTag { tag } => self.edit(|e| {
                e.remove_tag(&tag);
            }),
            UiEvent::SetScheduledFor { value } => self.edit(|e| e.set_scheduled_for(value)),
            UiEvent::OpenImageDialog { target } => self.edit(|e| e.open_image_dialog(target)),
            UiEvent::SelectImage { url } => self.edit(|e| {
                e.select_image(&url);
            }),
            UiEvent::SaveDraft => self.submit("draft").await,
            UiEvent::Publish => self.submit("publish").await,
            UiEvent::Schedule => self.submit("schedule").await,
            UiEvent::CloseEditor => self.close_editor(),
            UiEvent::ListPosts {
                search,
                status,
                sort,
            } => {
                if let Some(search) = search {
                    self.posts.set_search(search);
                }
                if let Some(status) = status {
                    self.posts.set_status(status);
                }
                if let Some(sort) = sort {
                    self.posts.set_sort(sort);
                }
                self.list_posts().await;
            }
            UiEvent::DeletePost { id, confirmed } => {
                self.posts.delete(&PostId::new(id), confirmed).await;
                self.emit_posts();
            }
            UiEvent::DuplicatePost { id } => self.posts.duplicate(&PostId::new(id)),
            UiEvent::SetUsername { username } => self.settings.set_username_input(username),
            UiEvent::SubmitUsername => {
                if self.settings.current_user().is_none() {
                    if let Err(err) = self.settings.load().await {
                        self.emit(Output::error(err.to_string()));
                        return;
                    }
                }
                if let Ok(username) = self.settings.submit().await {
                    self.emit(Output::Username {
                        username: Some(username),
                    });
                }
            }
            UiEvent::ToggleSidebar => {
                self.shell.toggle_sidebar();
                self.refresh_draft_badge().await;
                self.emit_sidebar();
            }
        }
    }

    async fn open_create(&mut self) {
        self.close_editor();
        let page = open_create_page(
            &self.state.users,
            self.state.editor_services(),
            self.state.editor_config,
        )
        .await;
        match page {
            Ok(CreatePage::Editor(editor)) => {
                self.editor = Some(editor);
                self.emit_editor();
            }
            Ok(CreatePage::UsernameRequired) => self.emit(Output::UsernameRequired {
                settings_path: CreatePage::settings_route().path(),
            }),
            Err(err) => self.emit(Output::error(err.to_string())),
        }
    }

    async fn open_edit(&mut self, id: PostId) {
        self.close_editor();
        match open_edit_page(&id, self.state.editor_services(), self.state.editor_config).await {
            Ok(editor) => {
                self.editor = Some(editor);
                self.emit_editor();
            }
            Err(err) => self.emit(Output::error(err.to_string())),
        }
    }

    fn edit(&self, f: impl FnOnce(&PostEditor)) {
        if let Some(editor) = self.editor() {
            f(editor);
            self.emit_editor();
        }
    }

    async fn submit(&mut self, action: &'static str) {
        let Some(editor) = self.editor() else {
            return;
        };
        let result = match action {
            "publish" => editor.publish().await,
            "schedule" => editor.schedule().await,
            _ => editor.save_draft(false).await,
        };
        let closed = !editor.is_open();
        match result {
            Ok(id) => self.emit(Output::Saved {
                action,
                post_id: id.to_string(),
            }),
            Err(EditorError::Validation(errors)) => self.emit(Output::invalid(&errors)),
            Err(err @ EditorError::Closed) => self.emit(Output::error(err.to_string())),
            // Already shown as a toast.
            Err(_) => {}
        }
        if closed {
            // Published: the view has moved on to the post listing.
            self.close_editor();
        } else {
            self.emit_editor();
        }
    }

    fn close_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.unmount();
        }
    }

    async fn list_posts(&self) {
        if let Err(err) = self.posts.load().await {
            self.emit(Output::error(err.to_string()));
            return;
        }
        self.emit_posts();
    }

    fn emit_posts(&self) {
        self.emit(Output::Posts {
            posts: self.posts.view(),
            empty_state: self.posts.empty_state(),
        });
    }

    async fn refresh_draft_badge(&mut self) {
        match self.state.posts.get_user_draft().await {
            Ok(draft) => self.shell.set_has_draft(draft.is_some()),
            Err(err) => tracing::warn!(error = %err, "Could not check for a draft"),
        }
    }

    fn emit_sidebar(&self) {
        let path = self.state.sink.current_path();
        let items = self
            .shell
            .items(&path)
            .into_iter()
            .map(|item| SidebarEntry {
                label: item.label,
                path: item.route.path(),
                active: item.active,
                badge: item.badge,
            })
            .collect();
        self.emit(Output::Sidebar {
            open: self.shell.is_sidebar_open(),
            items,
        });
    }

    fn emit_editor(&self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let form = editor.form();
        let header = editor.header();
        self.emit(Output::Editor {
            heading: header.heading,
            publish_label: header.publish_label,
            title: form.title().to_string(),
            tags: form.tags().to_vec(),
            draft_id: editor.draft_identity().id().map(|id| id.to_string()),
            autosave: match editor.autosave_state() {
                AutosaveState::Idle => "idle",
                AutosaveState::Armed => "armed",
            },
            can_schedule: header.can_schedule,
        });
    }

    /// Stop autosave before the process exits.
    pub fn shutdown(&mut self) {
        if let Some(editor) = &self.editor {
            tracing::info!(mode = ?editor.mode(), "Closing open editor");
        }
        self.close_editor();
    }
}
