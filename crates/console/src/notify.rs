//! Notification surface.

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

/// A transient, dismissible message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            message: message.into(),
        }
    }
}

/// Receives toasts from the views.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Records every toast in memory.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }

    pub fn errors(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .iter()
            .filter(|t| t.level == ToastLevel::Error)
            .cloned()
            .collect()
    }

    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock())
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().push(toast);
    }
}
