use std::fmt;

use super::PostId;

/// Screens the dashboard can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Create,
    Posts,
    EditPost(PostId),
    Followers,
    Settings,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/dashboard".to_string(),
            Route::Create => "/dashboard/create".to_string(),
            Route::Posts => "/dashboard/posts".to_string(),
            Route::EditPost(id) => format!("/dashboard/posts/edit/{id}"),
            Route::Followers => "/dashboard/followers".to_string(),
            Route::Settings => "/dashboard/settings".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
