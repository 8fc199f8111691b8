use async_trait::async_trait;

use crate::domain::CurrentUser;
use crate::error::RemoteError;

/// Remote user procedures.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_current_user(&self) -> Result<Option<CurrentUser>, RemoteError>;

    /// Set the caller's username. Format and uniqueness are checked remotely.
    async fn update_username(&self, username: &str) -> Result<(), RemoteError>;
}
