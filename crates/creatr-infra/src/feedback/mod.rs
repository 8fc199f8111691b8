//! Toast and navigation sinks that log through tracing and keep a history.

use std::sync::Mutex;

use creatr_core::domain::Route;
use creatr_core::ports::{Navigator, Notifier, Toast, ToastKind};

/// Keeps every toast it is shown.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => tracing::warn!(message = %toast.message, "Toast"),
            _ => tracing::info!(kind = ?toast.kind, message = %toast.message, "Toast"),
        }
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(toast);
    }
}

/// Client-side router history.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    /// Starts on the dashboard.
    pub fn new() -> Self {
        Self::starting_at(Route::Dashboard)
    }

    pub fn starting_at(route: Route) -> Self {
        Self {
            history: Mutex::new(vec![route]),
        }
    }

    pub fn current(&self) -> Route {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
            .unwrap_or(Route::Dashboard)
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Go back one entry; the first entry is never popped.
    pub fn back(&self) -> Route {
        let mut history = self.history.lock().unwrap_or_else(|e| e.into_inner());
        if history.len() > 1 {
            history.pop();
        }
        history.last().cloned().unwrap_or(Route::Dashboard)
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(path = %route, "Navigate");
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route);
    }
}
