//! Post editor: form state, autosave, submission and image insertion.

mod autosave;
mod draft;
mod form;
mod image;
mod payload;
mod shell;
mod submission;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, Local};

pub use autosave::{AutosaveController, AutosaveState, AutosaveStats, SilentSave};
pub use draft::{DraftIdentity, SaveRoute, route_for};
pub use form::{MAX_TAGS, MAX_TITLE_CHARS, PostForm};
pub use image::{EditorHandle, ImageInsertionBridge, InsertOutcome, UploadDialog, UploadTarget};
pub use payload::{SubmitAction, build_payload, format_local_datetime, parse_local_datetime};
pub use shell::{HeaderView, SettingsPanel};
pub use submission::SubmissionController;

use crate::domain::{Post, PostId, Route};
use crate::error::{EditorError, FormErrors};
use crate::ports::{Navigator, Notifier, PostService, RichTextEditor};

pub const DEFAULT_AUTOSAVE_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

/// Editor tuning.
#[derive(Debug, Clone, Copy)]
pub struct EditorConfig {
    pub autosave_period: Duration,
    /// Offset used to read and write the local scheduled-for input.
    pub utc_offset: FixedOffset,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            autosave_period: DEFAULT_AUTOSAVE_PERIOD,
            utc_offset: *Local::now().offset(),
        }
    }
}

impl EditorConfig {
    /// Default period, times read as UTC.
    pub fn utc() -> Self {
        Self {
            autosave_period: DEFAULT_AUTOSAVE_PERIOD,
            utc_offset: FixedOffset::east_opt(0).unwrap_or(*Local::now().offset()),
        }
    }

    pub fn with_autosave_period(mut self, period: Duration) -> Self {
        self.autosave_period = period;
        self
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }
}

/// Collaborators the editor talks to.
#[derive(Clone)]
pub struct EditorServices {
    pub posts: Arc<dyn PostService>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

/// State shared between the editor, its autosave timer and in-flight saves.
struct EditorCore {
    form: Mutex<PostForm>,
    errors: Mutex<FormErrors>,
    submission: SubmissionController,
    images: ImageInsertionBridge,
}

impl EditorCore {
    fn snapshot(&self) -> PostForm {
        self.form.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record_outcome<T>(&self, result: &Result<T, EditorError>) {
        let mut errors = self.errors.lock().unwrap_or_else(|e| e.into_inner());
        match result {
            Err(EditorError::Validation(found)) => *errors = found.clone(),
            Err(EditorError::ScheduleMissing) => {}
            _ => *errors = FormErrors::new(),
        }
    }
}

#[async_trait]
impl SilentSave for EditorCore {
    async fn save_silently(&self) -> Result<PostId, EditorError> {
        let form = self.snapshot();
        self.submission.save_draft(&form, true).await
    }
}

/// One mounted editor instance.
///
/// Dropping or [`unmount`](Self::unmount)ing it stops autosave; saves that
/// are already in flight complete but no longer touch editor state.
pub struct PostEditor {
    mode: EditorMode,
    core: Arc<EditorCore>,
    autosave: AutosaveController,
    settings: Mutex<SettingsPanel>,
    handle: EditorHandle,
    navigator: Arc<dyn Navigator>,
}

impl PostEditor {
    /// Mount an editor. Must be called from within a tokio runtime.
    ///
    /// `initial` seeds the form and the draft identity: the user's existing
    /// draft in create mode, the edited post in edit mode.
    pub fn mount(
        mode: EditorMode,
        initial: Option<&Post>,
        services: EditorServices,
        config: EditorConfig,
    ) -> Self {
        let form = initial
            .map(|post| PostForm::from_post(post, config.utc_offset))
            .unwrap_or_default();
        let identity = DraftIdentity::from(initial.map(|post| post.id.clone()));
        let handle = EditorHandle::default();
        let navigator = services.navigator.clone();
        let images = ImageInsertionBridge::new(handle.clone(), services.notifier.clone());
        let armed = form.has_meaningful_content();

        let core = Arc::new(EditorCore {
            form: Mutex::new(form),
            errors: Mutex::new(FormErrors::new()),
            submission: SubmissionController::new(mode, config, services, identity),
            images,
        });
        let autosave = AutosaveController::new(config.autosave_period, mode, core.clone());
        autosave.sync(armed);

        tracing::debug!(?mode, draft_id = ?initial.map(|p| p.id.as_str()), "Editor mounted");

        Self {
            mode,
            core,
            autosave,
            settings: Mutex::new(SettingsPanel::default()),
            handle,
            navigator,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> PostForm {
        self.core.snapshot()
    }

    /// Field messages from the last submission attempt.
    pub fn errors(&self) -> FormErrors {
        self.core.errors.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn draft_identity(&self) -> DraftIdentity {
        self.core.submission.identity()
    }

    pub fn autosave_state(&self) -> AutosaveState {
        self.autosave.state()
    }

    pub fn autosave_stats(&self) -> AutosaveStats {
        self.autosave.stats()
    }

    fn edit_form<R>(&self, f: impl FnOnce(&mut PostForm) -> R) -> R {
        let mut form = self.core.form.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut form)
    }

    /// Title and content changes re-arm (or disarm) autosave.
    fn edit_tracked(&self, f: impl FnOnce(&mut PostForm)) {
        let armed = self.edit_form(|form| {
            f(form);
            form.has_meaningful_content()
        });
        self.sync_autosave(armed);
    }

    /// A closed editor stays Idle whatever the form holds.
    fn sync_autosave(&self, armed: bool) {
        self.autosave.sync(armed && !self.core.submission.is_disposed());
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.edit_tracked(|form| form.set_title(title));
    }

    /// Called by the rich-text widget whenever its document changes.
    pub fn set_content(&self, html: impl Into<String>) {
        let html = html.into();
        self.edit_tracked(|form| form.set_content(html));
    }

    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.edit_form(|form| form.set_category(category));
    }

    pub fn set_tags(&self, tags: Vec<String>) {
        self.edit_form(|form| form.set_tags(tags));
    }

    pub fn add_tag(&self, tag: &str) -> bool {
        self.edit_form(|form| form.add_tag(tag))
    }

    pub fn remove_tag(&self, tag: &str) -> bool {
        self.edit_form(|form| form.remove_tag(tag))
    }

    pub fn set_featured_image(&self, url: impl Into<String>) {
        let url = url.into();
        self.edit_form(|form| form.set_featured_image(url));
    }

    pub fn set_scheduled_for(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit_form(|form| form.set_scheduled_for(value));
    }

    pub async fn save_draft(&self, silent: bool) -> Result<PostId, EditorError> {
        let form = self.core.snapshot();
        let result = self.core.submission.save_draft(&form, silent).await;
        if !silent {
            self.core.record_outcome(&result);
        }
        result
    }

    /// Publish the post. Success closes the editor: autosave stops and
    /// further saves fail with [`EditorError::Closed`].
    pub async fn publish(&self) -> Result<PostId, EditorError> {
        // No silent draft save may land after the publish.
        self.autosave.disarm();
        self.autosave.settle().await;

        let form = self.core.snapshot();
        let result = self.core.submission.publish(&form).await;
        self.core.record_outcome(&result);
        if result.is_err() {
            self.sync_autosave(form.has_meaningful_content());
        }
        result
    }

    /// False once the editor was unmounted or its post published.
    pub fn is_open(&self) -> bool {
        !self.core.submission.is_disposed()
    }

    pub async fn schedule(&self) -> Result<PostId, EditorError> {
        let form = self.core.snapshot();
        let result = self.core.submission.schedule(&form).await;
        self.core.record_outcome(&result);
        result
    }

    pub fn header(&self) -> HeaderView {
        let has_schedule = !self.core.snapshot().scheduled_for().is_empty();
        HeaderView::new(self.mode, self.core.submission.is_submitting(), has_schedule)
    }

    pub fn settings(&self) -> SettingsPanel {
        *self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn open_settings(&self) {
        self.settings.lock().unwrap_or_else(|e| e.into_inner()).open();
    }

    pub fn close_settings(&self) {
        self.settings.lock().unwrap_or_else(|e| e.into_inner()).close();
    }

    pub fn upload_dialog(&self) -> UploadDialog {
        self.core.images.dialog()
    }

    pub fn open_image_dialog(&self, target: UploadTarget) {
        self.core.images.open(target);
    }

    pub fn close_image_dialog(&self) {
        self.core.images.close();
    }

    pub fn select_image(&self, url: &str) -> InsertOutcome {
        let outcome = self.edit_form(|form| self.core.images.on_image_selected(url, form));
        if matches!(outcome, InsertOutcome::Inserted { .. }) {
            let armed = self.core.snapshot().has_meaningful_content();
            self.sync_autosave(armed);
        }
        outcome
    }

    /// Hand the mounted rich-text widget to the editor.
    pub fn attach_editor(&self, editor: Box<dyn RichTextEditor>) {
        self.handle.attach(editor);
    }

    pub fn detach_editor(&self) -> Option<Box<dyn RichTextEditor>> {
        self.handle.detach()
    }

    /// Header back button.
    pub fn back(&self) {
        self.navigator.push(Route::Dashboard);
    }

    /// Tear down: stop autosave and ignore any late save results.
    pub fn unmount(self) {
        self.autosave.disarm();
        self.core.submission.dispose();
        tracing::debug!(mode = ?self.mode, "Editor unmounted");
    }
}

impl Drop for PostEditor {
    fn drop(&mut self) {
        self.core.submission.dispose();
    }
}
