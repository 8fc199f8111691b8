//! Writes view updates as JSON lines and doubles as notifier and router.

use std::io::Write;
use std::sync::Mutex;

use creatr_core::domain::Route;
use creatr_core::ports::{Navigator, Notifier, Toast, ToastKind};

use crate::events::Output;

pub struct OutputSink {
    writer: Mutex<Box<dyn Write + Send>>,
    current: Mutex<Route>,
}

impl OutputSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            current: Mutex::new(Route::Dashboard),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn emit(&self, output: &Output) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let written = serde_json::to_writer(&mut *writer, output)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush());
        if let Err(e) = written {
            tracing::error!(error = %e, "Failed to write output");
        }
    }

    /// Path of the screen last navigated to.
    pub fn current_path(&self) -> String {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).path()
    }
}

impl Notifier for OutputSink {
    fn notify(&self, toast: Toast) {
        let kind = match toast.kind {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        };
        self.emit(&Output::Toast {
            kind,
            message: toast.message,
        });
    }
}

impl Navigator for OutputSink {
    fn push(&self, route: Route) {
        let path = route.path();
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = route;
        tracing::debug!(%path, "Navigate");
        self.emit(&Output::Navigate { path });
    }
}
