//! In-memory backend - stands in for the hosted backend in development and tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use creatr_core::domain::{CurrentUser, Post, PostId, PostPayload, PostStatus};
use creatr_core::error::RemoteError;
use creatr_core::ports::{PostService, UserService};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;

#[derive(Default)]
struct Store {
    posts: HashMap<PostId, Post>,
    users: HashMap<String, CurrentUser>,
    signed_in: Option<String>,
    failures: VecDeque<RemoteError>,
    calls: Vec<&'static str>,
}

impl Store {
    /// Record the call and pop any injected failure.
    fn enter(&mut self, function: &'static str) -> Result<(), RemoteError> {
        self.calls.push(function);
        match self.failures.pop_front() {
            Some(err) => {
                tracing::debug!(function, error = %err, "Injected failure");
                Err(err)
            }
            None => Ok(()),
        }
    }

    fn author(&self) -> Result<String, RemoteError> {
        self.signed_in.clone().ok_or(RemoteError::Unauthorized)
    }

    /// The author's newest draft.
    fn draft_of(&self, author: &str) -> Option<&Post> {
        self.posts
            .values()
            .filter(|p| p.author_id == author && p.is_draft())
            .max_by_key(|p| p.created_at)
    }

    fn owned_mut(&mut self, author: &str, id: &PostId) -> Result<&mut Post, RemoteError> {
        match self.posts.get_mut(id) {
            Some(post) if post.author_id == author => Ok(post),
            Some(_) => Err(RemoteError::Rejected("Not authorized to modify this post".into())),
            None => Err(RemoteError::NotFound),
        }
    }
}

/// Holds posts and users in memory behind an async `RwLock`.
///
/// Mirrors the hosted backend's rules that the client relies on: a create
/// while the author already has a draft folds into that draft, and usernames
/// are checked for format and uniqueness. Data is lost on drop.
pub struct InMemoryBackend {
    store: RwLock<Store>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// A backend with `user` registered and signed in.
    pub fn with_user(user: CurrentUser) -> Self {
        let mut store = Store {
            signed_in: Some(user.id.clone()),
            ..Store::default()
        };
        store.users.insert(user.id.clone(), user);
        Self {
            store: RwLock::new(store),
        }
    }

    pub async fn register(&self, user: CurrentUser) {
        self.store.write().await.users.insert(user.id.clone(), user);
    }

    pub async fn sign_in(&self, user_id: &str) {
        self.store.write().await.signed_in = Some(user_id.to_string());
    }

    pub async fn sign_out(&self) {
        self.store.write().await.signed_in = None;
    }

    /// Fail the next call with `err`.
    pub async fn fail_next(&self, err: RemoteError) {
        self.store.write().await.failures.push_back(err);
    }

    /// Function names called so far, in order.
    pub async fn calls(&self) -> Vec<&'static str> {
        self.store.read().await.calls.clone()
    }

    pub async fn count_calls(&self, function: &str) -> usize {
        self.store
            .read()
            .await
            .calls
            .iter()
            .filter(|c| **c == function)
            .count()
    }

    /// Every stored post, regardless of author.
    pub async fn all_posts(&self) -> Vec<Post> {
        self.store.read().await.posts.values().cloned().collect()
    }

    /// Insert a post as-is.
    pub async fn seed(&self, post: Post) {
        self.store.write().await.posts.insert(post.id.clone(), post);
    }

    fn validate_username(username: &str) -> Result<(), RemoteError> {
        let len = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(RemoteError::Rejected(format!(
                "Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters"
            )));
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
        if !username.chars().all(allowed) {
            return Err(RemoteError::Rejected(
                "Username can only contain letters, numbers, underscores, and hyphens".into(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostService for InMemoryBackend {
    async fn get_user_draft(&self) -> Result<Option<Post>, RemoteError> {
        let mut store = self.store.write().await;
        store.enter("posts:getUserDraft")?;
        let author = store.author()?;
        Ok(store.draft_of(&author).cloned())
    }

    async fn create_post(&self, payload: PostPayload) -> Result<PostId, RemoteError> {
        let mut store = self.store.write().await;
        store.enter("posts:create")?;
        let author = store.author()?;

        // One draft per author: fold into it, promoting it if the payload publishes.
        if let Some(id) = store.draft_of(&author).map(|p| p.id.clone()) {
            let post = store.owned_mut(&author, &id)?;
            post.apply(payload);
            tracing::debug!(post_id = %id, status = post.status.as_str(), "Create reconciled into draft");
            return Ok(id);
        }

        let id = PostId::new(Uuid::new_v4().simple().to_string());
        let post = Post::from_payload(id.clone(), author, payload, Utc::now().timestamp_millis());
        tracing::debug!(post_id = %id, status = post.status.as_str(), "Post created");
        store.posts.insert(id.clone(), post);
        Ok(id)
    }

    async fn update_post(&self, id: &PostId, payload: PostPayload) -> Result<PostId, RemoteError> {
        let mut store = self.store.write().await;
        store.enter("posts:update")?;
        let author = store.author()?;
        store.owned_mut(&author, id)?.apply(payload);
        Ok(id.clone())
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), RemoteError> {
        let mut store = self.store.write().await;
        store.enter("posts:deletePost")?;
        let author = store.author()?;
        store.owned_mut(&author, id)?;
        store.posts.remove(id);
        Ok(())
    }

    async fn get_user_posts(&self) -> Result<Vec<Post>, RemoteError> {
        let mut store = self.store.write().await;
        store.enter("posts:getUserPosts")?;
        let author = store.author()?;
        let mut posts: Vec<Post> = store
            .posts
            .values()
            .filter(|p| p.author_id == author)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, RemoteError> {
        let mut store = self.store.write().await;
        store.enter("posts:getPost")?;
        let author = store.author()?;
        Ok(store
            .posts
            .get(id)
            .filter(|p| p.author_id == author)
            .cloned())
    }
}

#[async_trait]
impl UserService for InMemoryBackend {
    async fn get_current_user(&self) -> Result<Option<CurrentUser>, RemoteError> {
        let mut store = self.store.write().await;
        store.enter("users:getCurrentUser")?;
        Ok(store
            .signed_in
            .as_ref()
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn update_username(&self, username: &str) -> Result<(), RemoteError> {
        let mut store = self.store.write().await;
        store.enter("users:updateUsername")?;
        let me = store.author()?;
        Self::validate_username(username)?;

        let taken = store.users.values().any(|u| {
            u.id != me
                && u
                    .username
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(username))
        });
        if taken {
            return Err(RemoteError::Rejected("Username is already taken".into()));
        }

        let user = store.users.get_mut(&me).ok_or(RemoteError::Unauthorized)?;
        user.username = Some(username.to_string());
        tracing::debug!(user_id = %me, %username, "Username set");
        Ok(())
    }
}
