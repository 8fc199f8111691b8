//! Turning form state into the payload sent to the backend.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use super::form::PostForm;
use crate::domain::{PostPayload, PostStatus};

/// Input formats accepted for a local date-time.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// The three user-facing submit actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Draft,
    Publish,
    Schedule,
}

impl SubmitAction {
    /// Status label sent with the payload.
    ///
    /// A scheduled post is stored as a draft carrying `scheduled_for`; the
    /// backend's scheduler publishes it.
    pub fn status(&self) -> PostStatus {
        match self {
            SubmitAction::Publish => PostStatus::Published,
            SubmitAction::Draft | SubmitAction::Schedule => PostStatus::Draft,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            SubmitAction::Draft => "Draft saved!",
            SubmitAction::Publish => "Post published!",
            SubmitAction::Schedule => "Post scheduled!",
        }
    }
}

/// Build the payload for `action`.
///
/// Empty optional strings become `None`; `tags` is always carried.
pub fn build_payload(form: &PostForm, action: SubmitAction, offset: FixedOffset) -> PostPayload {
    PostPayload {
        title: form.title().to_string(),
        content: form.content().to_string(),
        category: non_empty(form.category()),
        tags: form.tags().to_vec(),
        featured_image: non_empty(form.featured_image()),
        status: action.status(),
        scheduled_for: non_empty(form.scheduled_for())
            .and_then(|value| parse_local_datetime(&value, offset))
            .map(|instant| instant.timestamp_millis()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Interpret a `YYYY-MM-DDTHH:MM` string as wall-clock time at `offset`.
pub fn parse_local_datetime(value: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive = parse_naive_datetime(value)?;
    offset.from_local_datetime(&naive).single()
}

/// Render epoch milliseconds back into the editor's local input format.
pub fn format_local_datetime(epoch_ms: i64, offset: FixedOffset) -> Option<String> {
    let instant = DateTime::from_timestamp_millis(epoch_ms)?;
    Some(instant.with_timezone(&offset).format(LOCAL_FORMATS[0]).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn form() -> PostForm {
        let mut form = PostForm::new();
        form.set_title("Hello");
        form.set_content("<p>World</p>");
        form
    }

    #[test]
    fn test_empty_featured_image_is_omitted() {
        let payload = build_payload(&form(), SubmitAction::Draft, utc());

        assert_eq!(payload.featured_image, None);
        assert_eq!(payload.category, None);
        assert_eq!(payload.scheduled_for, None);
        assert!(payload.tags.is_empty());
        assert_eq!(payload.status, PostStatus::Draft);
    }

    #[test]
    fn test_set_optionals_are_carried() {
        let mut form = form();
        form.set_category("Tech");
        form.set_featured_image("https://img.example/cover.png");
        form.set_tags(vec!["rust".into(), "async".into()]);

        let payload = build_payload(&form, SubmitAction::Publish, utc());

        assert_eq!(payload.category.as_deref(), Some("Tech"));
        assert_eq!(
            payload.featured_image.as_deref(),
            Some("https://img.example/cover.png")
        );
        assert_eq!(payload.tags, vec!["rust".to_string(), "async".to_string()]);
        assert_eq!(payload.status, PostStatus::Published);
    }

    #[test]
    fn test_scheduled_for_converted_with_offset() {
        let mut form = form();
        form.set_scheduled_for("2030-01-01T10:00");

        let at_utc = build_payload(&form, SubmitAction::Schedule, utc());
        let at_plus_two = build_payload(
            &form,
            SubmitAction::Schedule,
            FixedOffset::east_opt(2 * 3600).unwrap(),
        );

        assert_eq!(at_utc.scheduled_for, Some(1_893_492_000_000));
        assert_eq!(at_plus_two.scheduled_for, Some(1_893_492_000_000 - 7_200_000));
        assert_eq!(at_utc.status, PostStatus::Draft);
    }

    #[test]
    fn test_format_round_trips_parse() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let ms = parse_local_datetime("2031-06-15T08:45", offset)
            .unwrap()
            .timestamp_millis();

        assert_eq!(
            format_local_datetime(ms, offset).as_deref(),
            Some("2031-06-15T08:45")
        );
    }

    #[test]
    fn test_seconds_are_accepted() {
        assert!(parse_naive_datetime("2031-06-15T08:45:30").is_some());
        assert!(parse_naive_datetime("2031-06-15").is_none());
    }
}
