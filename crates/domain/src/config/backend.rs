use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Backend connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL every API path (`/config`, `/logs`, ...) is appended to.
    #[serde(default = "d_base_url")]
    pub base_url: String,
    /// Server root for the unversioned endpoints (`/health`,
    /// `/config/reload`). Defaults to the origin of `base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    #[serde(default = "d_30000")]
    pub timeout_ms: u64,
    /// Environment variable holding the admin bearer token. Takes
    /// precedence over the keychain entry.
    #[serde(default = "d_token_env")]
    pub token_env: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            server_url: None,
            timeout_ms: 30_000,
            token_env: d_token_env(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "http://localhost:8000/v1".into()
}
fn d_30000() -> u64 {
    30_000
}
fn d_token_env() -> String {
    "VA_ADMIN_TOKEN".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_table() {
        let toml_str = r#"
            base_url = "https://bot.example.com/v1"
        "#;
        let cfg: BackendConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.base_url, "https://bot.example.com/v1");
        assert_eq!(cfg.timeout_ms, 30_000);
        assert_eq!(cfg.token_env, "VA_ADMIN_TOKEN");
        assert!(cfg.server_url.is_none());
    }

    #[test]
    fn server_url_is_optional_and_kept() {
        let toml_str = r#"
            base_url = "https://bot.example.com/voice/v1"
            server_url = "https://bot.example.com/voice"
        "#;
        let cfg: BackendConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server_url.as_deref(), Some("https://bot.example.com/voice"));
    }
}
