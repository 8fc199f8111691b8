//! Domain entities - the client's view of backend-owned objects.

mod post;
mod route;
mod user;

pub use post::{Post, PostId, PostPayload, PostStatus};
pub use route::Route;
pub use user::CurrentUser;
