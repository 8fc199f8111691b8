use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque post identifier handed out by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Publication status as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

/// Post entity - the client's possibly stale copy of a backend post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub author_id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<i64>,
    pub status: PostStatus,
    /// Epoch milliseconds.
    pub created_at: i64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
}

impl Post {
    /// Materialize a post from a client payload.
    pub fn from_payload(
        id: PostId,
        author_id: impl Into<String>,
        payload: PostPayload,
        created_at: i64,
    ) -> Self {
        let mut post = Self {
            id,
            author_id: author_id.into(),
            title: String::new(),
            content: String::new(),
            category: None,
            tags: Vec::new(),
            featured_image: None,
            scheduled_for: None,
            status: PostStatus::Draft,
            created_at,
            view_count: 0,
            like_count: 0,
        };
        post.apply(payload);
        post
    }

    /// Overwrite every client-editable field with the payload's values.
    pub fn apply(&mut self, payload: PostPayload) {
        self.title = payload.title;
        self.content = payload.content;
        self.category = payload.category;
        self.tags = payload.tags;
        self.featured_image = payload.featured_image;
        self.scheduled_for = payload.scheduled_for;
        self.status = payload.status;
    }

    pub fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }
}

/// Fields the editor transmits on create and update.
///
/// Optional fields are absent rather than empty; `tags` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_absent_optionals() {
        let payload = PostPayload {
            title: "Hello".into(),
            content: "<p>World</p>".into(),
            category: None,
            tags: vec![],
            featured_image: None,
            status: PostStatus::Draft,
            scheduled_for: None,
        };

        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "title": "Hello",
                "content": "<p>World</p>",
                "tags": [],
                "status": "draft",
            })
        );
    }

    #[test]
    fn test_post_deserializes_backend_shape() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "_id": "k17abc",
            "authorId": "u1",
            "title": "Alpha",
            "content": "<p>a</p>",
            "tags": ["rust"],
            "status": "published",
            "createdAt": 100,
            "viewCount": 3,
        }))
        .unwrap();

        assert_eq!(post.id, PostId::new("k17abc"));
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.view_count, 3);
        assert_eq!(post.like_count, 0);
        assert!(post.featured_image.is_none());
    }
}
