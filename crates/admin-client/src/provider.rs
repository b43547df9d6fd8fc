//! The `AdminApi` trait defines the interface for the admin backend
//! (REST, mock/test).

use async_trait::async_trait;
use va_domain::error::Result;

use crate::types::{BotConfig, HealthStatus, Lead, LogEntry, Order};

/// Abstraction over the backend's admin API surface.
///
/// Implementations may talk to the real REST API or a test double.
/// Calls are never retried; a failure is reported to the caller once.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetch the current bot configuration (GET /config).
    async fn fetch_config(&self) -> Result<BotConfig>;

    /// Replace the bot configuration wholesale (POST /config).
    async fn update_config(&self, config: &BotConfig) -> Result<()>;

    /// Recent server log entries, oldest first (GET /logs).
    async fn fetch_logs(&self) -> Result<Vec<LogEntry>>;

    /// Recent orders (GET /orders).
    async fn fetch_orders(&self) -> Result<Vec<Order>>;

    /// Captured leads (GET /leads).
    async fn fetch_leads(&self) -> Result<Vec<Lead>>;

    /// Health check (GET /health).
    async fn health(&self) -> Result<HealthStatus>;

    /// Ask the backend to drop its cached configuration (POST /config/reload).
    async fn reload_config(&self) -> Result<()>;
}
