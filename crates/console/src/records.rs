//! Read-only order and lead boards.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use va_client::{AdminApi, Lead, Order};
use va_domain::error::Result;

use crate::notify::{Notifier, Toast};
use crate::RefreshMode;

/// A row type a [`RecordBoard`] can fetch and display.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Plural noun used in messages ("orders", "leads").
    const NOUN: &'static str;

    async fn fetch(api: &dyn AdminApi) -> Result<Vec<Self>>;

    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn notes_cell(notes: &Option<String>) -> String {
    match notes.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_owned(),
        _ => "-".into(),
    }
}

#[async_trait]
impl Record for Order {
    const NOUN: &'static str = "orders";

    async fn fetch(api: &dyn AdminApi) -> Result<Vec<Self>> {
        api.fetch_orders().await
    }

    fn headers() -> &'static [&'static str] {
        &["Customer", "Phone", "Status", "Created", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.phone.clone(),
            self.status.clone().unwrap_or_else(|| "new".into()),
            self.created_at
                .as_deref()
                .map(crate::logs::format_timestamp)
                .unwrap_or_else(|| "-".into()),
            notes_cell(&self.notes),
        ]
    }
}

#[async_trait]
impl Record for Lead {
    const NOUN: &'static str = "leads";

    async fn fetch(api: &dyn AdminApi) -> Result<Vec<Self>> {
        api.fetch_leads().await
    }

    fn headers() -> &'static [&'static str] {
        &["Customer", "Phone", "Notes"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.phone.clone(),
            notes_cell(&self.notes),
        ]
    }
}

#[derive(Debug)]
struct BoardState<R> {
    rows: Vec<R>,
    loaded: bool,
}

pub struct RecordBoard<R: Record> {
    api: Arc<dyn AdminApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<BoardState<R>>,
}

impl<R: Record> RecordBoard<R> {
    pub fn new(api: Arc<dyn AdminApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(BoardState {
                rows: Vec::new(),
                loaded: false,
            }),
        }
    }

    pub fn rows(&self) -> Vec<R> {
        self.state.lock().rows.clone()
    }

    pub fn is_loading(&self) -> bool {
        !self.state.lock().loaded
    }

    /// Reload rows. On failure the previous rows stay; a loud refresh
    /// also notifies.
    pub async fn refresh(&self, mode: RefreshMode) -> Result<usize> {
        let result = R::fetch(self.api.as_ref()).await;

        let mut st = self.state.lock();
        st.loaded = true;
        match result {
            Ok(rows) => {
                let n = rows.len();
                st.rows = rows;
                tracing::debug!(noun = R::NOUN, rows = n, "records refreshed");
                Ok(n)
            }
            Err(e) => {
                drop(st);
                tracing::warn!(noun = R::NOUN, error = %e, "failed to fetch records");
                if mode == RefreshMode::Loud {
                    self.notifier
                        .notify(Toast::error(format!("Failed to fetch {}", R::NOUN)));
                }
                Err(e)
            }
        }
    }
}
