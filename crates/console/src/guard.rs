//! Route guarding.
//!
//! Every console view except login requires an authenticated session;
//! anything else is redirected to login.

use va_client::{Session, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Settings,
    Logs,
    Orders,
    Leads,
}

impl Route {
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    RedirectToLogin {
        from: Route,
        /// `true` when a previously valid session was rejected.
        expired: bool,
    },
}

pub fn guard(route: Route, session: &Session) -> Navigation {
    if !route.requires_auth() {
        return Navigation::Render(route);
    }
    match session.state() {
        SessionState::Authenticated => Navigation::Render(route),
        state => Navigation::RedirectToLogin {
            from: route,
            expired: state == SessionState::Expired,
        },
    }
}
