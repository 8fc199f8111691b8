//! Editable post fields and the schema they are checked against.

use std::borrow::Cow;

use chrono::FixedOffset;
use validator::{Validate, ValidationError};

use super::payload::{format_local_datetime, parse_naive_datetime};
use crate::domain::Post;
use crate::error::FormErrors;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TAGS: usize = 10;

/// The seven editable fields of a post, as the editor holds them.
///
/// Optional fields use empty strings for "unset"; the payload builder maps
/// those to absent values. Validation runs only when an action is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PostForm {
    #[validate(custom(function = "validate_title"))]
    title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    content: String,
    category: String,
    #[validate(length(max = 10, message = "Maximum 10 tags allowed"))]
    tags: Vec<String>,
    featured_image: String,
    /// Local date-time as typed, `YYYY-MM-DDTHH:MM`.
    #[validate(custom(function = "validate_scheduled_for"))]
    scheduled_for: String,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(
            ValidationError::new("required").with_message(Cow::Borrowed("Title is required")),
        );
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(
            ValidationError::new("length").with_message(Cow::Borrowed("Title too long")),
        );
    }
    Ok(())
}

fn validate_scheduled_for(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_naive_datetime(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("datetime").with_message(Cow::Borrowed("Invalid date and time")))
}

impl PostForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form from a stored post, rendering `scheduled_for` in `offset`.
    pub fn from_post(post: &Post, offset: FixedOffset) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            category: post.category.clone().unwrap_or_default(),
            tags: post.tags.clone(),
            featured_image: post.featured_image.clone().unwrap_or_default(),
            scheduled_for: post
                .scheduled_for
                .and_then(|ms| format_local_datetime(ms, offset))
                .unwrap_or_default(),
        }
    }

    /// Run the schema, collecting every field message.
    pub fn check(&self) -> Result<(), FormErrors> {
        self.validate().map_err(FormErrors::from)
    }

    /// True when there is anything worth autosaving.
    pub fn has_meaningful_content(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn featured_image(&self) -> &str {
        &self.featured_image
    }

    pub fn scheduled_for(&self) -> &str {
        &self.scheduled_for
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    pub fn set_featured_image(&mut self, url: impl Into<String>) {
        self.featured_image = url.into();
    }

    pub fn set_scheduled_for(&mut self, value: impl Into<String>) {
        self.scheduled_for = value.into();
    }

    /// Append a tag from the settings panel input.
    ///
    /// Blank input and case-insensitive duplicates are ignored. The tag
    /// limit is not enforced here; validation reports it on submit.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PostForm {
        let mut form = PostForm::new();
        form.set_title("Hello");
        form.set_content("<p>World</p>");
        form
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().check().is_ok());
    }

    #[test]
    fn test_empty_title_and_content_report_both_fields() {
        let errors = PostForm::new().check().unwrap_err();

        assert_eq!(errors.first("title"), Some("Title is required"));
        assert_eq!(errors.first("content"), Some("Content is required"));
    }

    #[test]
    fn test_title_limit_counts_characters() {
        let mut form = valid_form();
        form.set_title("é".repeat(MAX_TITLE_CHARS));
        assert!(form.check().is_ok());

        form.set_title("é".repeat(MAX_TITLE_CHARS + 1));
        let errors = form.check().unwrap_err();
        assert_eq!(errors.first("title"), Some("Title too long"));
    }

    #[test]
    fn test_more_than_ten_tags_rejected() {
        let mut form = valid_form();
        form.set_tags((0..MAX_TAGS).map(|i| format!("t{i}")).collect());
        assert!(form.check().is_ok());

        form.set_tags((0..=MAX_TAGS).map(|i| format!("t{i}")).collect());
        let errors = form.check().unwrap_err();
        assert_eq!(errors.first("tags"), Some("Maximum 10 tags allowed"));
    }

    #[test]
    fn test_unparseable_schedule_rejected() {
        let mut form = valid_form();
        form.set_scheduled_for("next tuesday");

        let errors = form.check().unwrap_err();
        assert_eq!(errors.first("scheduled_for"), Some("Invalid date and time"));

        form.set_scheduled_for("2030-01-02T09:30");
        assert!(form.check().is_ok());
    }

    #[test]
    fn test_add_tag_trims_and_deduplicates() {
        let mut form = PostForm::new();

        assert!(form.add_tag("  rust "));
        assert!(!form.add_tag("Rust"));
        assert!(!form.add_tag("   "));
        assert_eq!(form.tags(), ["rust".to_string()]);

        assert!(form.remove_tag("rust"));
        assert!(form.tags().is_empty());
    }

    #[test]
    fn test_meaningful_content_is_title_or_content() {
        let mut form = PostForm::new();
        assert!(!form.has_meaningful_content());

        form.set_title("Draft A");
        assert!(form.has_meaningful_content());

        form.set_title("");
        form.set_content("<p>x</p>");
        assert!(form.has_meaningful_content());
    }
}
