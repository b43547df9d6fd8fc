//! REST implementation of [`AdminApi`].
//!
//! `RestAdminClient` wraps a `reqwest::Client` and translates every
//! trait method into the corresponding HTTP call against the backend's
//! admin API. The bearer token comes from the shared [`Session`]; an
//! auth rejection moves that session to `expired`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use va_domain::config::BackendConfig;
use va_domain::error::{Error, Result};
use va_domain::trace::TraceEvent;

use crate::provider::AdminApi;
use crate::session::Session;
use crate::types::{BotConfig, HealthStatus, Lead, LogEntry, Order, UpdateAck};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST-based client for the admin API.
///
/// Created once per console process and reused; the underlying
/// `reqwest::Client` maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestAdminClient {
    http: Client,
    base_url: String,
    server_url: String,
    session: Arc<Session>,
    timeout: Duration,
}

impl RestAdminClient {
    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Root the unversioned endpoints hang off.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Build a new client from the console's `BackendConfig`.
    pub fn new(cfg: &BackendConfig, session: Arc<Session>) -> Result<Self> {
        let timeout = Duration::from_millis(cfg.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let base_url = cfg.base_url.trim().trim_end_matches('/').to_owned();
        let server_url = match cfg.server_url.as_deref() {
            Some(s) => s.trim().trim_end_matches('/').to_owned(),
            None => origin_of(&base_url),
        };

        Ok(Self {
            http,
            base_url,
            server_url,
            session,
            timeout,
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Decorate a `RequestBuilder` with the standard console headers.
    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        let trace_id = Uuid::new_v4().to_string();
        let mut rb = rb
            .header("X-Client-Type", "voicebot-admin")
            .header("X-Trace-Id", &trace_id);

        if let Some(token) = self.session.bearer() {
            rb = rb.bearer_auth(token);
        }
        rb
    }

    /// Build the full URL for an API path like `/config`.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the full URL for a server-root path like `/health`.
    fn root_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    /// Send a request once and classify the outcome.
    ///
    /// * 2xx is returned as-is.
    /// * 401/403 become `Error::Auth` and reject the session.
    /// * Any other status becomes `Error::Status`.
    async fn execute(&self, endpoint: &str, rb: RequestBuilder) -> Result<Response> {
        let start = Instant::now();
        let result = self.decorate(rb).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::AdminApiCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::AdminApiCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.session.reject();
            return Err(Error::Auth(format!(
                "{endpoint} auth failed ({}): {body}",
                status.as_u16()
            )));
        }
        Err(Error::Status {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json_at(path, self.url(path)).await
    }

    async fn get_json_at<T: DeserializeOwned>(&self, path: &str, url: String) -> Result<T> {
        let endpoint = format!("GET {path}");
        let resp = self.execute(&endpoint, self.http.get(url)).await?;

        let body = resp.text().await.map_err(from_reqwest)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Other(format!("failed to parse {endpoint} response: {e}: {body}")))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl AdminApi for RestAdminClient {
    async fn fetch_config(&self) -> Result<BotConfig> {
        self.get_json("/config").await
    }

    async fn update_config(&self, config: &BotConfig) -> Result<()> {
        let resp = self
            .execute("POST /config", self.http.post(self.url("/config")).json(config))
            .await?;

        // Anything other than an explicit error acknowledgment is discarded.
        let body = resp.text().await.map_err(from_reqwest)?;
        if let Ok(ack) = serde_json::from_str::<UpdateAck>(&body) {
            if ack.is_error() {
                return Err(Error::Rejected(
                    ack.message.unwrap_or_else(|| "config update refused".into()),
                ));
            }
        }
        Ok(())
    }

    async fn fetch_logs(&self) -> Result<Vec<LogEntry>> {
        self.get_json("/logs").await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.get_json("/orders").await
    }

    async fn fetch_leads(&self) -> Result<Vec<Lead>> {
        self.get_json("/leads").await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get_json_at("/health", self.root_url("/health")).await
    }

    async fn reload_config(&self) -> Result<()> {
        self.execute(
            "POST /config/reload",
            self.http.post(self.root_url("/config/reload")),
        )
        .await?;
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `scheme://host[:port]` of `url`, or `url` itself when it does not
/// parse.
fn origin_of(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => url.to_owned(),
    }
}

/// Convert a `reqwest::Error` into a domain `Error`.
///
/// Timeout errors become `Error::Timeout`; everything else becomes
/// `Error::Http`.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}
