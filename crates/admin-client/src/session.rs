//! Explicit session context shared by the HTTP client and the route
//! guard.
//!
//! Lifecycle:
//!
//! ```text
//! anonymous ──begin──▶ authenticating ──complete──▶ authenticated
//!     ▲                     │                            │
//!     └──── fail / logout ──┘                     401/403│
//!     ▲                                                  ▼
//!     └──────────────── logout / begin ───────────── expired
//! ```
//!
//! The token is held while authenticating so the verification request
//! itself carries it. [`verify_token`] drives that step against a
//! guarded endpoint.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use va_domain::error::{Error, Result};
use va_domain::trace::TraceEvent;

use crate::provider::AdminApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated,
    Expired,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::Expired => "expired",
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    token: Option<String>,
    authenticated_at: Option<DateTime<Utc>>,
}

/// Operator session. Shared behind an `Arc` between the client (which
/// reads the bearer token and reports rejections) and the front end
/// (which drives login/logout and guards routes).
#[derive(Debug)]
pub struct Session {
    inner: RwLock<Inner>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with no credentials.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: SessionState::Anonymous,
                token: None,
                authenticated_at: None,
            }),
        }
    }

    /// A session restored from a previously stored token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: SessionState::Authenticated,
                token: Some(token.into()),
                authenticated_at: Some(Utc::now()),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.read().state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn authenticated_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().authenticated_at
    }

    /// Token to send as `Authorization: Bearer`, if the session is
    /// currently allowed to use one.
    pub fn bearer(&self) -> Option<String> {
        let inner = self.inner.read();
        match inner.state {
            SessionState::Authenticating | SessionState::Authenticated => inner.token.clone(),
            SessionState::Anonymous | SessionState::Expired => None,
        }
    }

    /// Start verifying a candidate token.
    pub fn begin_authentication(&self, token: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.token = Some(token.into());
        inner.authenticated_at = None;
        transition(&mut inner, SessionState::Authenticating);
    }

    /// Accept the candidate token.
    pub fn complete_authentication(&self) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.state != SessionState::Authenticating {
            return Err(Error::Auth(format!(
                "cannot complete authentication from state {}",
                inner.state.as_str()
            )));
        }
        inner.authenticated_at = Some(Utc::now());
        transition(&mut inner, SessionState::Authenticated);
        Ok(())
    }

    /// Drop the candidate token after a failed verification.
    pub fn fail_authentication(&self) {
        let mut inner = self.inner.write();
        if inner.state == SessionState::Authenticating {
            inner.token = None;
            transition(&mut inner, SessionState::Anonymous);
        }
    }

    /// The backend refused the token (401/403).
    pub fn reject(&self) {
        let mut inner = self.inner.write();
        match inner.state {
            SessionState::Authenticating => {
                inner.token = None;
                transition(&mut inner, SessionState::Anonymous);
            }
            SessionState::Authenticated => {
                inner.authenticated_at = None;
                transition(&mut inner, SessionState::Expired);
            }
            SessionState::Anonymous | SessionState::Expired => {}
        }
    }

    pub fn logout(&self) {
        let mut inner = self.inner.write();
        inner.token = None;
        inner.authenticated_at = None;
        transition(&mut inner, SessionState::Anonymous);
    }
}

/// Log in with `token`: the session authenticates only if the backend
/// accepts the token on `GET /config`, which requires auth.
///
/// On failure the session is back to anonymous and holds no token.
pub async fn verify_token(api: &dyn AdminApi, session: &Session, token: &str) -> Result<()> {
    session.begin_authentication(token);
    match api.fetch_config().await {
        Ok(_) => session.complete_authentication(),
        Err(e) => {
            session.fail_authentication();
            Err(e)
        }
    }
}

fn transition(inner: &mut Inner, to: SessionState) {
    if inner.state == to {
        return;
    }
    TraceEvent::SessionTransition {
        from: inner.state.as_str().to_owned(),
        to: to.as_str().to_owned(),
    }
    .emit();
    inner.state = to;
}
