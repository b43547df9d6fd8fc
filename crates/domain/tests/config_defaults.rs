use std::time::Duration;

use va_domain::config::Config;

#[test]
fn default_backend_is_local() {
    let config = Config::default();
    assert_eq!(config.backend.base_url, "http://localhost:8000/v1");
}

#[test]
fn default_poll_interval_is_five_seconds() {
    let config = Config::default();
    assert_eq!(config.logs.poll_interval(), Duration::from_secs(5));
}

#[test]
fn empty_file_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.backend.timeout_ms, 30_000);
    assert_eq!(config.credentials.service, "voicebot-admin");
    assert_eq!(config.credentials.account, "admin-token");
}

#[test]
fn sections_parse() {
    let toml_str = r#"
[backend]
base_url = "https://bot.example.com/v1"
token_env = "BOT_TOKEN"

[logs]
poll_interval_secs = 10
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.backend.base_url, "https://bot.example.com/v1");
    assert_eq!(config.backend.token_env, "BOT_TOKEN");
    assert_eq!(config.logs.poll_interval(), Duration::from_secs(10));
}

#[test]
fn admin_token_env_default() {
    let config = Config::default();
    assert_eq!(config.backend.token_env, "VA_ADMIN_TOKEN");
}
