//! Image insertion bridge - routes an uploaded image to the featured-image
//! field or into the document at the caret.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::form::PostForm;
use crate::ports::{Notifier, RichTextEditor};

/// Which upload affordance opened the shared dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadTarget {
    #[default]
    Featured,
    Content,
}

impl UploadTarget {
    pub fn dialog_title(&self) -> &'static str {
        match self {
            UploadTarget::Featured => "Upload Featured Image",
            UploadTarget::Content => "Insert Image",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadDialog {
    pub open: bool,
    pub target: UploadTarget,
}

/// What a selection ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    FeaturedSet,
    Inserted { index: usize },
    /// The content editor was not mounted; nothing changed.
    Skipped,
}

/// Slot for the rich-text widget, filled once it mounts.
#[derive(Clone, Default)]
pub struct EditorHandle(Arc<Mutex<Option<Box<dyn RichTextEditor>>>>);

impl EditorHandle {
    pub fn attach(&self, editor: Box<dyn RichTextEditor>) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(editor);
    }

    pub fn detach(&self) -> Option<Box<dyn RichTextEditor>> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn is_attached(&self) -> bool {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    /// Run `f` against the widget, or return `None` if none is attached.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn RichTextEditor) -> R) -> Option<R> {
        let mut slot = self.0.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_mut().map(|editor| f(editor.as_mut()))
    }
}

pub struct ImageInsertionBridge {
    dialog: Mutex<UploadDialog>,
    handle: EditorHandle,
    notifier: Arc<dyn Notifier>,
}

impl ImageInsertionBridge {
    pub fn new(handle: EditorHandle, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            dialog: Mutex::new(UploadDialog::default()),
            handle,
            notifier,
        }
    }

    pub fn dialog(&self) -> UploadDialog {
        *self.dialog.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn open(&self, target: UploadTarget) {
        *self.dialog.lock().unwrap_or_else(|e| e.into_inner()) = UploadDialog { open: true, target };
    }

    pub fn close(&self) {
        self.dialog.lock().unwrap_or_else(|e| e.into_inner()).open = false;
    }

    /// Apply the image picked in the dialog, then close the dialog.
    pub fn on_image_selected(&self, url: &str, form: &mut PostForm) -> InsertOutcome {
        let target = self.dialog().target;
        let outcome = match target {
            UploadTarget::Featured => {
                form.set_featured_image(url);
                self.notifier.success("Featured image added!");
                InsertOutcome::FeaturedSet
            }
            UploadTarget::Content => match self.insert_into_document(url) {
                Some((index, html)) => {
                    form.set_content(html);
                    self.notifier.success("Image inserted!");
                    InsertOutcome::Inserted { index }
                }
                None => {
                    tracing::debug!("Content editor not mounted; image insert skipped");
                    InsertOutcome::Skipped
                }
            },
        };
        self.close();
        outcome
    }

    fn insert_into_document(&self, url: &str) -> Option<(usize, String)> {
        self.handle.with(|editor| {
            let index = editor
                .get_selection()
                .map_or_else(|| editor.get_length(), |range| range.index);
            editor.insert_embed(index, url);
            editor.set_selection(index + 1);
            (index, editor.html())
        })
    }
}
