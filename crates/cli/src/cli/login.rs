//! `va-admin login` / `va-admin logout`.
//!
//! Login reads the admin token without echo, verifies it against the
//! guarded `GET /config`, and only then stores it in the OS keychain.

use va_client::verify_token;
use va_console::Route;

use crate::context::Console;

pub async fn login(console: &Console, no_store: bool) -> anyhow::Result<()> {
    console.enter(Route::Login)?;

    let token = rpassword::prompt_password_stderr("Admin token: ")?;
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("no token entered");
    }

    verify_token(console.client.as_ref(), &console.session, token)
        .await
        .map_err(|e| anyhow::anyhow!("login failed: {e}"))?;
    eprintln!("Authenticated against {}", console.client.base_url());

    if no_store {
        eprintln!("Token not stored (--no-store).");
        return Ok(());
    }

    console
        .tokens
        .save(token)
        .map_err(|e| anyhow::anyhow!("storing token in keychain: {e}"))?;
    eprintln!("Token stored in the OS keychain.");
    Ok(())
}

pub fn logout(console: &Console) -> anyhow::Result<()> {
    console.session.logout();
    console
        .tokens
        .clear()
        .map_err(|e| anyhow::anyhow!("removing token from keychain: {e}"))?;
    eprintln!("Logged out.");
    if std::env::var(&console.config.backend.token_env).is_ok() {
        eprintln!(
            "note: {} is still set in the environment and will be used next time",
            console.config.backend.token_env
        );
    }
    Ok(())
}
