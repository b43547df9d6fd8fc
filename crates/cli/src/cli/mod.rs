pub mod config;
pub mod doctor;
pub mod login;
pub mod logs;
pub mod records;
pub mod settings;

use clap::{Parser, Subcommand};

/// va-admin — operator console for the voice-assistant backend.
#[derive(Debug, Parser)]
#[command(name = "va-admin", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify an admin token against the backend and store it in the OS keychain.
    Login {
        /// Verify the token for this invocation only; do not store it.
        #[arg(long)]
        no_store: bool,
    },
    /// Forget the stored admin token.
    Logout,
    /// Bot configuration: system prompt and dynamic extraction fields.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Show recent server logs, newest first.
    Logs {
        /// Keep polling and print new entries as they arrive.
        #[arg(short, long)]
        follow: bool,
    },
    /// List recent orders.
    Orders,
    /// List captured leads.
    Leads,
    /// Check that the backend is up.
    Health,
    /// Ask the backend to drop its cached configuration.
    Reload,
    /// Run diagnostic checks against the local config and the backend.
    Doctor,
    /// Local console configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the system prompt and dynamic fields.
    Show {
        /// Print the raw configuration as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Edit the prompt and dynamic fields interactively.
    Edit,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `VA_CONFIG` (or
/// `va-admin.toml` by default). Returns the parsed [`Config`] and the
/// path that was used.
///
/// [`Config`]: va_domain::config::Config
pub fn load_config() -> anyhow::Result<(va_domain::config::Config, String)> {
    let config_path = std::env::var("VA_CONFIG").unwrap_or_else(|_| "va-admin.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

/// Parse the config at `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config_from(path: &str) -> anyhow::Result<va_domain::config::Config> {
    if !std::path::Path::new(path).exists() {
        tracing::debug!(path, "config file not found, using defaults");
        return Ok(va_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {path}: {e}"))
}
