//! Presentation state around the editor: header and settings panel.

use super::EditorMode;

/// What the editor header renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub heading: &'static str,
    pub publish_label: &'static str,
    /// A user-triggered save is waiting on the backend.
    pub is_publishing: bool,
    /// Schedule is offered once a publication time has been picked.
    pub can_schedule: bool,
    /// Explicit "save draft" only makes sense for unpublished work.
    pub can_save_draft: bool,
}

impl HeaderView {
    pub fn new(mode: EditorMode, is_publishing: bool, has_schedule: bool) -> Self {
        let (heading, publish_label) = match mode {
            EditorMode::Create => ("Create Post", "Publish"),
            EditorMode::Edit => ("Edit Post", "Update"),
        };
        Self {
            heading,
            publish_label,
            is_publishing,
            can_schedule: has_schedule,
            can_save_draft: mode == EditorMode::Create,
        }
    }
}

/// Open/closed state of the settings side panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPanel {
    open: bool,
}

impl SettingsPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_labels_follow_mode() {
        let create = HeaderView::new(EditorMode::Create, false, false);
        assert_eq!(create.heading, "Create Post");
        assert_eq!(create.publish_label, "Publish");
        assert!(create.can_save_draft);
        assert!(!create.can_schedule);

        let edit = HeaderView::new(EditorMode::Edit, true, true);
        assert_eq!(edit.publish_label, "Update");
        assert!(edit.is_publishing);
        assert!(edit.can_schedule);
        assert!(!edit.can_save_draft);
    }
}
