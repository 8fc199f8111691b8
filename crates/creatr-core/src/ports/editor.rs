//! Capability interface over an embedded rich-text widget.

/// Caret position or highlighted range inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub length: usize,
}

impl Selection {
    pub fn caret(index: usize) -> Self {
        Self { index, length: 0 }
    }
}

/// Any rich-text widget the editor can drive.
///
/// Indices count document units: one per character, one per embed.
pub trait RichTextEditor: Send {
    /// Current selection, or `None` when the widget is not focused.
    fn get_selection(&self) -> Option<Selection>;

    /// Insert an image embed at `index`.
    fn insert_embed(&mut self, index: usize, url: &str);

    fn set_selection(&mut self, index: usize);

    fn get_length(&self) -> usize;

    /// The document serialized as HTML, as stored in the post content.
    fn html(&self) -> String;
}
