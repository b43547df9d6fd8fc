//! Admin token storage.
//!
//! Resolution order for [`resolve_token`]:
//! 1. the environment variable named by `backend.token_env`
//! 2. the OS keychain entry `credentials.service` / `credentials.account`
//!
//! The keychain is reached through the `keyring` crate (macOS Keychain,
//! Windows Credential Manager, Linux Secret Service). Headless systems
//! without a keychain daemon fall through to "no token".

use va_domain::config::{BackendConfig, CredentialsConfig};
use va_domain::error::{Error, Result};

/// Where a resolved token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Env(String),
    Keychain,
}

/// Keychain entry holding the admin token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    service: String,
    account: String,
}

impl TokenStore {
    pub fn new(cfg: &CredentialsConfig) -> Self {
        Self {
            service: cfg.service.clone(),
            account: cfg.account.clone(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.account)
            .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))
    }

    /// Read the stored token. `Ok(None)` when no entry exists.
    pub fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(Error::Auth(format!("keyring get_password failed: {e}"))),
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(|e| Error::Auth(format!("keyring set_password failed: {e}")))
    }

    /// Remove the stored token. Missing entries are not an error.
    pub fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(Error::Auth(format!("keyring delete failed: {e}"))),
        }
    }
}

/// Find the admin token, if any is configured.
pub fn resolve_token(
    backend: &BackendConfig,
    store: &TokenStore,
) -> Option<(String, TokenSource)> {
    if let Some(token) = token_from_env(&backend.token_env) {
        tracing::debug!(env_var = %backend.token_env, "admin token resolved from env");
        return Some((token, TokenSource::Env(backend.token_env.clone())));
    }

    match store.load() {
        Ok(Some(token)) if !token.trim().is_empty() => {
            tracing::debug!("admin token resolved from keychain");
            Some((token, TokenSource::Keychain))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, "keychain unavailable; continuing without stored token");
            None
        }
    }
}

fn token_from_env(var: &str) -> Option<String> {
    if var.is_empty() {
        return None;
    }
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
