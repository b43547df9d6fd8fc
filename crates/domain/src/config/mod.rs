mod backend;
mod credentials;
mod logs;

pub use backend::*;
pub use credentials::*;
pub use logs::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Local configuration of the admin console (not the bot config that
/// lives on the backend).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let url = self.backend.base_url.trim();
        if url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "backend.base_url".into(),
                message: "base_url must not be empty".into(),
            });
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "backend.base_url".into(),
                message: format!("base_url must be an http(s) URL (got \"{url}\")"),
            });
        } else if url.starts_with("http://")
            && !(url.contains("://localhost") || url.contains("://127.0.0.1"))
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "backend.base_url".into(),
                message: "plain http to a non-local host sends the admin token in clear text"
                    .into(),
            });
        }

        if let Some(server) = &self.backend.server_url {
            let server = server.trim();
            if !(server.starts_with("http://") || server.starts_with("https://")) {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "backend.server_url".into(),
                    message: format!("server_url must be an http(s) URL (got \"{server}\")"),
                });
            }
        }

        if self.backend.timeout_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "backend.timeout_ms".into(),
                message: "timeout_ms must be greater than 0".into(),
            });
        }

        if self.backend.token_env.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "backend.token_env".into(),
                message: "no token env var configured; only the keychain will be consulted"
                    .into(),
            });
        }

        if self.logs.poll_interval_secs == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "logs.poll_interval_secs".into(),
                message: "poll interval must be at least 1 second".into(),
            });
        }

        if self.credentials.service.is_empty() || self.credentials.account.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "credentials".into(),
                message: "keychain service and account must not be empty".into(),
            });
        }

        errors
    }
}
