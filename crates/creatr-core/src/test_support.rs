//! Recording fakes for the ports, used by unit tests across the crate.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{CurrentUser, Post, PostId, PostPayload, Route};
use crate::editor::EditorServices;
use crate::error::RemoteError;
use crate::ports::{Navigator, Notifier, PostService, RichTextEditor, Selection, Toast, ToastKind, UserService};

#[derive(Debug, Clone)]
pub enum Call {
    Create(PostPayload),
    Update(PostId, PostPayload),
    Delete(PostId),
}

/// Post service fake: hands out sequential ids and records every write.
#[derive(Default)]
pub struct FakePosts {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<VecDeque<RemoteError>>,
    posts: Mutex<Vec<Post>>,
    delay: Mutex<Option<Duration>>,
    next_id: Mutex<u32>,
}

impl FakePosts {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Create(_)))
            .count()
    }

    pub fn fail_next(&self, err: RemoteError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn seed(&self, post: Post) {
        self.posts.lock().unwrap().push(post);
    }

    async fn respond(&self, call: Call) -> Result<PostId, RemoteError> {
        self.calls.lock().unwrap().push(call.clone());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        match call {
            Call::Update(id, _) | Call::Delete(id) => Ok(id),
            Call::Create(_) => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                Ok(PostId::new(format!("post-{next}")))
            }
        }
    }
}

#[async_trait]
impl PostService for FakePosts {
    async fn get_user_draft(&self) -> Result<Option<Post>, RemoteError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.is_draft()).cloned())
    }

    async fn create_post(&self, payload: PostPayload) -> Result<PostId, RemoteError> {
        self.respond(Call::Create(payload)).await
    }

    async fn update_post(&self, id: &PostId, payload: PostPayload) -> Result<PostId, RemoteError> {
        self.respond(Call::Update(id.clone(), payload)).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), RemoteError> {
        self.respond(Call::Delete(id.clone())).await?;
        self.posts.lock().unwrap().retain(|p| &p.id != id);
        Ok(())
    }

    async fn get_user_posts(&self) -> Result<Vec<Post>, RemoteError> {
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, RemoteError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| &p.id == id).cloned())
    }
}

#[derive(Default)]
pub struct FakeUsers {
    pub user: Mutex<Option<CurrentUser>>,
    pub failures: Mutex<VecDeque<RemoteError>>,
    pub updates: Mutex<Vec<String>>,
}

#[async_trait]
impl UserService for FakeUsers {
    async fn get_current_user(&self) -> Result<Option<CurrentUser>, RemoteError> {
        Ok(self.user.lock().unwrap().clone())
    }

    async fn update_username(&self, username: &str) -> Result<(), RemoteError> {
        self.updates.lock().unwrap().push(username.to_string());
        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }
        if let Some(user) = self.user.lock().unwrap().as_mut() {
            user.username = Some(username.to_string());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct Toasts(Mutex<Vec<Toast>>);

impl Notifier for Toasts {
    fn notify(&self, toast: Toast) {
        self.0.lock().unwrap().push(toast);
    }
}

#[derive(Default)]
pub struct Routes(Mutex<Vec<Route>>);

impl Navigator for Routes {
    fn push(&self, route: Route) {
        self.0.lock().unwrap().push(route);
    }
}

/// Fake services wired together, with accessors for assertions.
pub struct Harness {
    pub posts: Arc<FakePosts>,
    pub users: Arc<FakeUsers>,
    pub toasts: Arc<Toasts>,
    pub routes: Arc<Routes>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(FakePosts::default()),
            users: Arc::new(FakeUsers::default()),
            toasts: Arc::new(Toasts::default()),
            routes: Arc::new(Routes::default()),
        }
    }

    pub fn services(&self) -> EditorServices {
        EditorServices {
            posts: self.posts.clone(),
            notifier: self.toasts.clone(),
            navigator: self.routes.clone(),
        }
    }

    pub fn toasts(&self) -> Vec<(ToastKind, String)> {
        self.toasts
            .0
            .lock()
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.message.clone()))
            .collect()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.0.lock().unwrap().clone()
    }
}

/// Plain-text document: each char is one unit, each embed one unit.
#[derive(Debug, Default)]
pub struct FakeDocument {
    pub units: Vec<String>,
    pub selection: Option<Selection>,
}

impl FakeDocument {
    pub fn with_text(text: &str) -> Self {
        Self {
            units: text.chars().map(|c| c.to_string()).collect(),
            selection: None,
        }
    }
}

impl RichTextEditor for FakeDocument {
    fn get_selection(&self) -> Option<Selection> {
        self.selection
    }

    fn insert_embed(&mut self, index: usize, url: &str) {
        let index = index.min(self.units.len());
        self.units.insert(index, format!("[img:{url}]"));
    }

    fn set_selection(&mut self, index: usize) {
        self.selection = Some(Selection::caret(index));
    }

    fn get_length(&self) -> usize {
        self.units.len()
    }

    fn html(&self) -> String {
        format!("<p>{}</p>", self.units.concat())
    }
}

pub fn post(id: &str, title: &str, status: crate::domain::PostStatus, created_at: i64) -> Post {
    Post {
        id: PostId::new(id),
        author_id: "user-1".into(),
        title: title.into(),
        content: format!("<p>{title}</p>"),
        category: None,
        tags: vec![],
        featured_image: None,
        scheduled_for: None,
        status,
        created_at,
        view_count: 0,
        like_count: 0,
    }
}
