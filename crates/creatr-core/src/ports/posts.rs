use async_trait::async_trait;

use crate::domain::{Post, PostId, PostPayload};
use crate::error::RemoteError;

/// Remote post procedures exposed by the backend.
///
/// The backend owns storage and authorization; callers only see ids and
/// reactive snapshots.
#[async_trait]
pub trait PostService: Send + Sync {
    /// The caller's single outstanding draft, if any.
    async fn get_user_draft(&self) -> Result<Option<Post>, RemoteError>;

    /// Create a post. The backend folds this into an existing draft of the
    /// same user instead of creating a second one.
    async fn create_post(&self, payload: PostPayload) -> Result<PostId, RemoteError>;

    async fn update_post(&self, id: &PostId, payload: PostPayload) -> Result<PostId, RemoteError>;

    async fn delete_post(&self, id: &PostId) -> Result<(), RemoteError>;

    /// Every post authored by the caller, drafts included.
    async fn get_user_posts(&self) -> Result<Vec<Post>, RemoteError>;

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, RemoteError>;
}
