//! Post listing: client-side filter/sort and the "My Posts" page controller.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::domain::{Post, PostId, PostStatus, Route};
use crate::error::RemoteError;
use crate::ports::{Navigator, Notifier, PostService};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    fn admits(&self, status: PostStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => status == PostStatus::Published,
            StatusFilter::Draft => status == PostStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    MostViews,
    MostLikes,
    Alphabetical,
}

/// Filter by title substring and status, then sort.
///
/// Pure: returns a fresh vector and never touches `posts`. The sort is
/// stable, so ties keep their backend order.
pub fn filter_and_sort(
    posts: &[Post],
    query: &str,
    status: StatusFilter,
    sort: SortKey,
) -> Vec<Post> {
    let needle = query.to_lowercase();
    let mut out: Vec<Post> = posts
        .iter()
        .filter(|post| post.title.to_lowercase().contains(&needle))
        .filter(|post| status.admits(post.status))
        .cloned()
        .collect();

    match sort {
        SortKey::Newest => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::MostViews => out.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        SortKey::MostLikes => out.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
        SortKey::Alphabetical => out.sort_by(|a, b| a.title.cmp(&b.title)),
    }
    out
}

/// Current filter inputs of the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl ListingQuery {
    fn is_filtering(&self) -> bool {
        !self.search.is_empty() || self.status != StatusFilter::All
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user dismissed the confirmation.
    Cancelled,
    Failed,
}

struct PageState {
    posts: Vec<Post>,
    query: ListingQuery,
}

/// The "My Posts" screen.
pub struct PostsPage {
    posts: Arc<dyn PostService>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<PageState>,
}

impl PostsPage {
    pub fn new(
        posts: Arc<dyn PostService>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            posts,
            notifier,
            navigator,
            state: Mutex::new(PageState {
                posts: Vec::new(),
                query: ListingQuery::default(),
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Refresh the cached post list from the backend.
    pub async fn load(&self) -> Result<usize, RemoteError> {
        let posts = self.posts.get_user_posts().await?;
        let count = posts.len();
        self.state().posts = posts;
        tracing::debug!(count, "Loaded posts");
        Ok(count)
    }

    pub fn query(&self) -> ListingQuery {
        self.state().query.clone()
    }

    pub fn set_query(&self, query: ListingQuery) {
        self.state().query = query;
    }

    pub fn set_search(&self, search: impl Into<String>) {
        self.state().query.search = search.into();
    }

    pub fn set_status(&self, status: StatusFilter) {
        self.state().query.status = status;
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.state().query.sort = sort;
    }

    pub fn all_posts(&self) -> Vec<Post> {
        self.state().posts.clone()
    }

    /// Posts as currently filtered and sorted.
    pub fn view(&self) -> Vec<Post> {
        let state = self.state();
        filter_and_sort(
            &state.posts,
            &state.query.search,
            state.query.status,
            state.query.sort,
        )
    }

    /// Text shown when the view is empty, or `None` when there is something to show.
    pub fn empty_state(&self) -> Option<&'static str> {
        if !self.view().is_empty() {
            return None;
        }
        if self.state().query.is_filtering() {
            Some("No posts found")
        } else {
            Some("No posts yet")
        }
    }

    pub fn edit(&self, id: &PostId) {
        self.navigator.push(Route::EditPost(id.clone()));
    }

    /// Delete after the caller has asked the user to confirm.
    pub async fn delete(&self, id: &PostId, confirmed: bool) -> DeleteOutcome {
        if !confirmed {
            return DeleteOutcome::Cancelled;
        }
        match self.posts.delete_post(id).await {
            Ok(()) => {
                self.state().posts.retain(|post| &post.id != id);
                tracing::info!(post_id = %id, "Post deleted");
                self.notifier.success("Post deleted successfully");
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::error!(post_id = %id, error = %err, "Delete failed");
                self.notifier.error("Failed to delete post");
                DeleteOutcome::Failed
            }
        }
    }

    // TODO: wire to a duplicatePost procedure once the backend exposes one.
    pub fn duplicate(&self, id: &PostId) {
        tracing::debug!(post_id = %id, "Duplicate requested");
        self.notifier.info("Duplication feature coming soon!");
    }
}
