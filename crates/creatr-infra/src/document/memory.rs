//! In-memory rich-text document - text and image embeds, rendered as HTML.

use creatr_core::ports::{RichTextEditor, Selection};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Unit {
    Char(char),
    Image(String),
}

/// A flat document where every character and every embed is one unit.
///
/// Newlines split paragraphs when rendering.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    units: Vec<Unit>,
    selection: Option<Selection>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            units: text.chars().map(Unit::Char).collect(),
            selection: None,
        }
    }

    /// Insert text at `index` (clamped to the end) and move the caret after it.
    pub fn insert_text(&mut self, index: usize, text: &str) {
        let index = index.min(self.units.len());
        let count = text.chars().count();
        self.units
            .splice(index..index, text.chars().map(Unit::Char));
        self.selection = Some(Selection::caret(index + count));
    }

    /// Type at the caret, or at the end when unfocused.
    pub fn type_text(&mut self, text: &str) {
        let at = self
            .selection
            .map_or(self.units.len(), |range| range.index);
        self.insert_text(at, text);
    }

    pub fn delete(&mut self, index: usize, length: usize) {
        let start = index.min(self.units.len());
        let end = (start + length).min(self.units.len());
        self.units.drain(start..end);
        self.selection = Some(Selection::caret(start));
    }

    pub fn select(&mut self, index: usize, length: usize) {
        self.selection = Some(Selection { index, length });
    }

    /// Drop focus; later inserts go to the end.
    pub fn blur(&mut self) {
        self.selection = None;
    }

    pub fn image_urls(&self) -> Vec<&str> {
        self.units
            .iter()
            .filter_map(|u| match u {
                Unit::Image(url) => Some(url.as_str()),
                Unit::Char(_) => None,
            })
            .collect()
    }

    pub fn plain_text(&self) -> String {
        self.units
            .iter()
            .filter_map(|u| match u {
                Unit::Char(c) => Some(*c),
                Unit::Image(_) => None,
            })
            .collect()
    }
}

fn escape(c: char, out: &mut String) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}

impl RichTextEditor for InMemoryDocument {
    fn get_selection(&self) -> Option<Selection> {
        self.selection
    }

    fn insert_embed(&mut self, index: usize, url: &str) {
        let index = index.min(self.units.len());
        self.units.insert(index, Unit::Image(url.to_string()));
    }

    fn set_selection(&mut self, index: usize) {
        self.selection = Some(Selection::caret(index.min(self.units.len())));
    }

    fn get_length(&self) -> usize {
        self.units.len()
    }

    fn html(&self) -> String {
        if self.units.is_empty() {
            return String::new();
        }
        let mut out = String::from("<p>");
        for unit in &self.units {
            match unit {
                Unit::Char('\n') => out.push_str("</p><p>"),
                Unit::Char(c) => escape(*c, &mut out),
                Unit::Image(url) => {
                    out.push_str("<img src=\"");
                    url.chars().for_each(|c| escape(c, &mut out));
                    out.push_str("\">");
                }
            }
        }
        out.push_str("</p>");
        out
    }
}
