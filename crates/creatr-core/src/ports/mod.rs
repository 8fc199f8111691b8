//! Ports - trait definitions for everything outside the client core.
//! Adapters in `creatr-infra` (and test fakes) implement these.

mod editor;
mod feedback;
mod posts;
mod users;

pub use editor::{RichTextEditor, Selection};
pub use feedback::{Navigator, Notifier, Toast, ToastKind};
pub use posts::PostService;
pub use users::UserService;
