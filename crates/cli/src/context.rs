//! Shared wiring for every console command: local config, session,
//! REST client and notifier.

use std::sync::Arc;

use va_client::{resolve_token, AdminApi, RestAdminClient, Session, TokenStore};
use va_console::{guard, Navigation, Notifier, Route};
use va_domain::config::Config;

use crate::terminal::TerminalNotifier;

pub struct Console {
    pub config: Config,
    pub session: Arc<Session>,
    pub client: Arc<RestAdminClient>,
    pub notifier: Arc<TerminalNotifier>,
    pub tokens: TokenStore,
}

impl Console {
    /// Build the console, restoring a session from the env var or the
    /// keychain when a token is available.
    pub fn open(config: Config) -> anyhow::Result<Self> {
        let tokens = TokenStore::new(&config.credentials);
        let session = match resolve_token(&config.backend, &tokens) {
            Some((token, source)) => {
                tracing::debug!(?source, "restoring session from stored token");
                Arc::new(Session::with_token(token))
            }
            None => Arc::new(Session::new()),
        };

        let client = RestAdminClient::new(&config.backend, session.clone())
            .map_err(|e| anyhow::anyhow!("building HTTP client: {e}"))?;

        Ok(Self {
            config,
            session,
            client: Arc::new(client),
            notifier: Arc::new(TerminalNotifier),
            tokens,
        })
    }

    pub fn api(&self) -> Arc<dyn AdminApi> {
        self.client.clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }

    /// Check the route guard before rendering a view.
    pub fn enter(&self, route: Route) -> anyhow::Result<()> {
        match guard(route, &self.session) {
            Navigation::Render(_) => Ok(()),
            Navigation::RedirectToLogin { expired: true, .. } => {
                anyhow::bail!("session expired; run `va-admin login` again")
            }
            Navigation::RedirectToLogin { from, .. } => anyhow::bail!(
                "{from:?} requires login; run `va-admin login` or set {}",
                self.config.backend.token_env
            ),
        }
    }
}
