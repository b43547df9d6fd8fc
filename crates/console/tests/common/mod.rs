//! In-memory stand-in for the admin backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use va_client::{AdminApi, BotConfig, HealthStatus, Lead, LogEntry, Order};
use va_domain::error::{Error, Result};

/// Holds `update_config` until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MockApi {
    /// `None` makes `fetch_config` fail.
    pub config: Mutex<Option<BotConfig>>,
    pub posted: Mutex<Vec<BotConfig>>,
    pub fail_updates: AtomicBool,
    pub gate: Option<Arc<Gate>>,
    /// `None` makes `fetch_logs` fail.
    pub logs: Mutex<Option<Vec<LogEntry>>>,
    pub log_calls: AtomicUsize,
    /// Holds `fetch_logs` until the test releases it.
    pub log_gate: Option<Arc<Gate>>,
    pub leads: Mutex<Option<Vec<Lead>>>,
    pub orders: Mutex<Option<Vec<Order>>>,
}

impl MockApi {
    pub fn with_config(raw: serde_json::Value) -> Self {
        Self {
            config: Mutex::new(Some(serde_json::from_value(raw).unwrap())),
            ..Default::default()
        }
    }

    pub fn log_calls(&self) -> usize {
        self.log_calls.load(Ordering::SeqCst)
    }
}

fn unavailable(what: &str) -> Error {
    Error::Http(format!("{what}: connection refused"))
}

#[async_trait]
impl AdminApi for MockApi {
    async fn fetch_config(&self) -> Result<BotConfig> {
        self.config.lock().clone().ok_or_else(|| unavailable("GET /config"))
    }

    async fn update_config(&self, config: &BotConfig) -> Result<()> {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(unavailable("POST /config"));
        }
        self.posted.lock().push(config.clone());
        *self.config.lock() = Some(config.clone());
        Ok(())
    }

    async fn fetch_logs(&self) -> Result<Vec<LogEntry>> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.log_gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.logs.lock().clone().ok_or_else(|| unavailable("GET /logs"))
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.orders.lock().clone().ok_or_else(|| unavailable("GET /orders"))
    }

    async fn fetch_leads(&self) -> Result<Vec<Lead>> {
        self.leads.lock().clone().ok_or_else(|| unavailable("GET /leads"))
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "ok".into(),
        })
    }

    async fn reload_config(&self) -> Result<()> {
        Ok(())
    }
}

pub fn log_entry(message: &str) -> LogEntry {
    LogEntry {
        timestamp: "2024-05-01T10:00:00".into(),
        level: Some("INFO".into()),
        message: message.into(),
        module: "main".into(),
        function: "run".into(),
        line: 1,
    }
}
