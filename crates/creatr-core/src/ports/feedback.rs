//! User feedback ports: toasts and navigation.

use crate::domain::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A transient in-app notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Sink for in-app notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Error,
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Info,
            message: message.to_string(),
        });
    }
}

/// Client-side router.
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}
