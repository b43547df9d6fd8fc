//! `va-client` — REST client for the voice-assistant admin API.
//!
//! Provides the [`AdminApi`] trait that abstracts over the backend's
//! admin endpoints, a production REST implementation
//! ([`RestAdminClient`]), typed DTOs for the wire format, the explicit
//! [`Session`] context whose token the client injects into every
//! request, and keychain-backed token storage.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use va_domain::config::BackendConfig;
//! use va_client::{AdminApi, RestAdminClient, Session};
//!
//! # async fn example() -> va_domain::error::Result<()> {
//! let session = Arc::new(Session::with_token("secret"));
//! let client = RestAdminClient::new(&BackendConfig::default(), session)?;
//!
//! let config = client.fetch_config().await?;
//! println!("{} dynamic fields", config.voice_settings.dynamic_fields.len());
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod provider;
pub mod rest;
pub mod session;
pub mod types;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use credentials::{resolve_token, TokenSource, TokenStore};
pub use provider::AdminApi;
pub use rest::{from_reqwest, RestAdminClient};
pub use session::{verify_token, Session, SessionState};
pub use types::{BotConfig, HealthStatus, Lead, LogEntry, Order, UpdateAck, VoiceSettings};
