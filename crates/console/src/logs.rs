//! Server log tail.
//!
//! The backend returns its most recent log lines oldest-first; the view
//! keeps them newest-first. A loud refresh (operator pressed refresh)
//! shows progress and reports failures; a quiet refresh (background
//! poll) only logs them.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime};
use parking_lot::Mutex;
use tokio::sync::watch;
use va_client::{AdminApi, LogEntry};
use va_domain::error::Result;
use va_domain::trace::TraceEvent;

use crate::notify::{Notifier, Toast};
use crate::RefreshMode;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layouts the backend's log sink is known to write without
/// an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S,%3f",
];

/// Render a log timestamp in local time. Anything unparseable is
/// returned unchanged so one bad row never breaks the table.
pub fn format_timestamp(raw: &str) -> String {
    let ts = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    // Offset-less timestamps are already local.
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
            return naive.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelBadge {
    Error,
    Warning,
    Info,
    Debug,
    Other(String),
    /// No level on the entry.
    Missing,
}

impl LevelBadge {
    pub fn from_level(level: Option<&str>) -> Self {
        let Some(level) = level.filter(|l| !l.is_empty()) else {
            return Self::Missing;
        };
        match level.to_ascii_uppercase().as_str() {
            "ERROR" => Self::Error,
            "WARNING" => Self::Warning,
            "INFO" => Self::Info,
            "DEBUG" => Self::Debug,
            _ => Self::Other(level.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Other(l) => l,
            Self::Missing => "LOG",
        }
    }
}

/// One display-ready table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub timestamp: String,
    pub level: LevelBadge,
    pub message: String,
    /// `module:line`
    pub location: String,
    /// `module.function:line`
    pub full_location: String,
}

impl From<&LogEntry> for LogRow {
    fn from(e: &LogEntry) -> Self {
        Self {
            timestamp: format_timestamp(&e.timestamp),
            level: LevelBadge::from_level(e.level.as_deref()),
            message: e.message.clone(),
            location: format!("{}:{}", e.module, e.line),
            full_location: format!("{}.{}:{}", e.module, e.function, e.line),
        }
    }
}

#[derive(Debug, Default)]
struct TailState {
    entries: Vec<LogEntry>,
    loaded: bool,
    refreshing: bool,
}

/// Clears the refreshing indicator when the refresh ends or is dropped.
struct Refreshing<'a>(&'a Mutex<TailState>);

impl Drop for Refreshing<'_> {
    fn drop(&mut self) {
        self.0.lock().refreshing = false;
    }
}

pub struct LogTail {
    api: Arc<dyn AdminApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<TailState>,
    /// Bumped after every successful refresh.
    updates: watch::Sender<u64>,
}

impl LogTail {
    pub fn new(api: Arc<dyn AdminApi>, notifier: Arc<dyn Notifier>) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            api,
            notifier,
            state: Mutex::new(TailState::default()),
            updates,
        }
    }

    /// Receiver that changes whenever new entries have been stored.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// True until the first refresh has completed (either way).
    pub fn is_loading(&self) -> bool {
        !self.state.lock().loaded
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Entries, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state.lock().entries.clone()
    }

    pub fn rows(&self) -> Vec<LogRow> {
        self.state.lock().entries.iter().map(LogRow::from).collect()
    }

    /// Reload from the backend. Previous entries are kept on failure.
    pub async fn refresh(&self, mode: RefreshMode) -> Result<usize> {
        let indicator = (mode == RefreshMode::Loud).then(|| {
            self.state.lock().refreshing = true;
            Refreshing(&self.state)
        });

        let result = self.api.fetch_logs().await;
        drop(indicator);

        let mut st = self.state.lock();
        st.loaded = true;
        match result {
            Ok(mut entries) => {
                entries.reverse();
                let n = entries.len();
                st.entries = entries;
                drop(st);
                self.updates.send_modify(|generation| *generation += 1);
                TraceEvent::LogsPolled {
                    entries: n,
                    quiet: mode == RefreshMode::Quiet,
                }
                .emit();
                Ok(n)
            }
            Err(e) => {
                drop(st);
                match mode {
                    RefreshMode::Loud => {
                        tracing::warn!(error = %e, "failed to fetch logs");
                        self.notifier.notify(Toast::error("Failed to fetch logs"));
                    }
                    RefreshMode::Quiet => {
                        tracing::debug!(error = %e, "background log refresh failed");
                    }
                }
                Err(e)
            }
        }
    }
}
