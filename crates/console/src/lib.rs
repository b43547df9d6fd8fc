//! `va-console` — view models for the voicebot admin console.
//!
//! Each view owns the state one screen of the console needs and talks to
//! the backend through [`va_client::AdminApi`]; user-facing outcomes are
//! reported through a [`Notifier`].
//!
//! | View              | Backend           | Refresh                   |
//! |-------------------|-------------------|---------------------------|
//! | [`ConfigEditor`]  | GET/POST /config  | load once, save wholesale |
//! | [`LogTail`]       | GET /logs         | [`LogPoller`] every 5 s   |
//! | [`RecordBoard`]   | GET /orders, /leads | manual                  |
//!
//! [`guard`] decides which of them an operator may reach.

pub mod editor;
pub mod fields;
pub mod guard;
pub mod logs;
pub mod notify;
pub mod poller;
pub mod records;
pub mod table;

pub use editor::{ConfigEditor, EditorStatus};
pub use fields::{DynamicField, FieldAttr, FieldList};
pub use guard::{guard, Navigation, Route};
pub use logs::{LevelBadge, LogRow, LogTail};
pub use notify::{Notifier, Toast, ToastLevel, ToastLog};
pub use poller::LogPoller;
pub use records::{Record, RecordBoard};

/// How a view reload presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Operator-initiated: show progress and report failures.
    Loud,
    /// Background: no progress indicator, failures only logged.
    Quiet,
}
