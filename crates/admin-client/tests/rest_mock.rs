//! Integration test: boots an in-process axum server that simulates the
//! admin backend, points a real [`RestAdminClient`] at it, and asserts
//! request shape, header injection and error classification.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use va_client::{verify_token, AdminApi, BotConfig, RestAdminClient, Session, SessionState};
use va_domain::config::BackendConfig;
use va_domain::error::Error;

const TOKEN: &str = "letmein";

// ── Mini backend ────────────────────────────────────────────────────────

#[derive(Default)]
struct Backend {
    config: Mutex<Value>,
    posted: Mutex<Vec<Value>>,
    reject_next_update: Mutex<bool>,
    reloads: Mutex<u32>,
}

type Shared = Arc<Backend>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn get_config(State(b): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no"})));
    }
    assert_eq!(headers["x-client-type"], "voicebot-admin");
    assert!(headers.contains_key("x-trace-id"));
    (StatusCode::OK, Json(b.config.lock().clone()))
}

async fn post_config(
    State(b): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "no"})));
    }
    let mut reject = b.reject_next_update.lock();
    if *reject {
        *reject = false;
        return (
            StatusCode::OK,
            Json(json!({"status": "error", "message": "Validation failed: voice_id"})),
        );
    }
    b.posted.lock().push(body.clone());
    *b.config.lock() = body;
    (StatusCode::OK, Json(json!({"status": "success", "message": "Config updated"})))
}

async fn get_logs() -> Json<Value> {
    Json(json!([
        {"timestamp": "2024-05-01T10:00:00", "level": "INFO", "message": "first",
         "module": "main", "function": "startup", "line": 10},
        {"timestamp": "2024-05-01T10:00:05", "level": "ERROR", "message": "second",
         "module": "vapi", "function": "call", "line": 42}
    ]))
}

async fn get_leads() -> Json<Value> {
    Json(json!([{"customer_name": "Ann", "phone": "+100", "notes": "call back"}]))
}

async fn get_orders() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "sheet offline")
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn reload(State(b): State<Shared>) -> Json<Value> {
    *b.reloads.lock() += 1;
    Json(json!({"status": "success", "message": "Configuration reloaded"}))
}

async fn start_backend() -> (SocketAddr, Shared) {
    let backend: Shared = Arc::new(Backend::default());
    *backend.config.lock() = json!({
        "system_prompt": "Hi",
        "knowledge_base_file": "kb.md",
        "voice_settings": {
            "provider": "11labs",
            "voice_id": "v1",
            "stability": 0.5,
            "similarity_boost": 0.75,
            "dynamic_fields": {"name": "full name"}
        }
    });

    let app = Router::new()
        // Health and reload sit at the server root, outside the API prefix.
        .route("/health", get(health))
        .route("/config/reload", post(reload))
        .route("/v1/config", get(get_config).post(post_config))
        .route("/v1/logs", get(get_logs))
        .route("/v1/leads", get(get_leads))
        .route("/v1/orders", get(get_orders))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, backend)
}

fn client_for(addr: SocketAddr, session: Arc<Session>) -> RestAdminClient {
    let cfg = BackendConfig {
        base_url: format!("http://{addr}/v1/"),
        timeout_ms: 5_000,
        ..Default::default()
    };
    RestAdminClient::new(&cfg, session).unwrap()
}

// ── Tests ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_and_update_config_roundtrip() {
    let (addr, backend) = start_backend().await;
    let client = client_for(addr, Arc::new(Session::with_token(TOKEN)));

    let mut cfg: BotConfig = client.fetch_config().await.unwrap();
    assert_eq!(cfg.system_prompt, "Hi");
    assert_eq!(cfg.voice_settings.dynamic_fields["name"], "full name");

    cfg.voice_settings
        .dynamic_fields
        .insert("name".into(), "legal name".into());
    client.update_config(&cfg).await.unwrap();

    let posted = backend.posted.lock().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["voice_settings"]["dynamic_fields"]["name"], "legal name");
    // Keys the client does not model survive the round trip.
    assert_eq!(posted[0]["knowledge_base_file"], "kb.md");
}

#[tokio::test]
async fn error_acknowledgment_is_a_rejected_save() {
    let (addr, backend) = start_backend().await;
    let client = client_for(addr, Arc::new(Session::with_token(TOKEN)));
    *backend.reject_next_update.lock() = true;

    let cfg = client.fetch_config().await.unwrap();
    let err = client.update_config(&cfg).await.unwrap_err();
    assert!(matches!(err, Error::Rejected(ref m) if m.contains("voice_id")));
    assert!(backend.posted.lock().is_empty());
}

#[tokio::test]
async fn unauthorized_expires_the_session() {
    let (addr, _backend) = start_backend().await;
    let session = Arc::new(Session::with_token("wrong"));
    let client = client_for(addr, session.clone());

    let err = client.fetch_config().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(session.state(), SessionState::Expired);
}

#[tokio::test]
async fn anonymous_session_sends_no_token() {
    let (addr, _backend) = start_backend().await;
    let session = Arc::new(Session::new());
    let client = client_for(addr, session.clone());

    assert!(matches!(client.fetch_config().await, Err(Error::Auth(_))));
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn logs_come_back_in_server_order() {
    let (addr, _backend) = start_backend().await;
    let client = client_for(addr, Arc::new(Session::with_token(TOKEN)));

    let logs = client.fetch_logs().await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].message, "first");
    assert_eq!(logs[1].level.as_deref(), Some("ERROR"));
    assert_eq!(logs[1].line, 42);
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let (addr, _backend) = start_backend().await;
    let client = client_for(addr, Arc::new(Session::with_token(TOKEN)));

    match client.fetch_orders().await {
        Err(Error::Status { status, body, .. }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "sheet offline");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn leads_health_and_reload() {
    let (addr, backend) = start_backend().await;
    let client = client_for(addr, Arc::new(Session::with_token(TOKEN)));

    let leads = client.fetch_leads().await.unwrap();
    assert_eq!(leads[0].customer_name, "Ann");
    assert_eq!(client.health().await.unwrap().status, "ok");

    client.reload_config().await.unwrap();
    assert_eq!(*backend.reloads.lock(), 1);
}

#[tokio::test]
async fn wrong_token_does_not_log_in() {
    let (addr, _backend) = start_backend().await;
    let session = Arc::new(Session::new());
    let client = client_for(addr, session.clone());

    // Health is open, so it proves nothing about the token.
    assert!(client.health().await.is_ok());

    let err = verify_token(&client, &session, "guess").await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.bearer().is_none());
}

#[tokio::test]
async fn right_token_logs_in() {
    let (addr, _backend) = start_backend().await;
    let session = Arc::new(Session::new());
    let client = client_for(addr, session.clone());

    verify_token(&client, &session, TOKEN).await.unwrap();
    assert!(session.is_authenticated());
    assert_eq!(session.bearer().as_deref(), Some(TOKEN));
}

#[tokio::test]
async fn unreachable_backend_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, Arc::new(Session::with_token(TOKEN)));
    assert!(matches!(client.health().await, Err(Error::Http(_))));
}
