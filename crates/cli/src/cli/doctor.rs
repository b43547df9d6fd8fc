use va_client::{AdminApi, SessionState};
use va_domain::config::ConfigSeverity;
use va_domain::error::Error;

use crate::context::Console;

/// Run all diagnostic checks and print a summary.
///
/// Returns `Ok(true)` when every check passes, `Ok(false)` when at least
/// one check failed.
pub async fn run(console: &Console, config_path: &str) -> anyhow::Result<bool> {
    println!("va-admin doctor");
    println!("===============\n");

    let mut all_passed = true;

    // 1. Config file
    check_config_file(config_path, &mut all_passed);

    // 2. Config validation
    check_config_validation(console, &mut all_passed);

    // 3. Backend reachable
    check_backend(console, &mut all_passed).await;

    // 4. Admin token accepted
    check_token(console, &mut all_passed).await;

    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    Ok(all_passed)
}

/// `va-admin health` — print the backend's health status.
pub async fn health(console: &Console) -> anyhow::Result<()> {
    let health = console.client.health().await?;
    println!("{}: {}", console.client.server_url(), health.status);
    Ok(())
}

/// `va-admin reload` — ask the backend to drop its cached config.
pub async fn reload(console: &Console) -> anyhow::Result<()> {
    console.enter(va_console::Route::Settings)?;
    console.client.reload_config().await?;
    println!("Configuration reloaded");
    Ok(())
}

// ── Individual checks ─────────────────────────────────────────────────

fn check_config_file(config_path: &str, all_passed: &mut bool) {
    let exists = std::path::Path::new(config_path).exists();
    print_check(
        "Config file exists",
        exists,
        if exists {
            config_path.to_owned()
        } else {
            format!("{config_path} not found (using defaults)")
        },
    );
    if !exists {
        *all_passed = false;
    }
}

fn check_config_validation(console: &Console, all_passed: &mut bool) {
    let issues = console.config.validate();
    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
        return;
    }
    print_check(
        "Config validation",
        error_count == 0,
        format!("{} issue(s) ({} error(s))", issues.len(), error_count),
    );
    for issue in &issues {
        println!("      {issue}");
    }
    if error_count > 0 {
        *all_passed = false;
    }
}

async fn check_backend(console: &Console, all_passed: &mut bool) {
    let url = console.client.server_url();
    match console.client.health().await {
        Ok(health) => print_check(
            "Backend reachable",
            true,
            format!("{url} (status: {})", health.status),
        ),
        // An auth failure still proves the backend answered.
        Err(Error::Auth(_)) => print_check("Backend reachable", true, url.to_owned()),
        Err(e) => {
            print_check("Backend reachable", false, format!("{url} ({e})"));
            *all_passed = false;
        }
    }
}

async fn check_token(console: &Console, all_passed: &mut bool) {
    let state = console.session.state();
    if state == SessionState::Anonymous {
        print_check(
            "Admin token",
            false,
            format!(
                "none found (set {} or run `va-admin login`)",
                console.config.backend.token_env
            ),
        );
        *all_passed = false;
        return;
    }

    // Any authenticated read will do; config is the cheapest one that
    // the backend guards.
    let ok = console.client.fetch_config().await.is_ok() && console.session.is_authenticated();
    print_check(
        "Admin token",
        ok,
        if ok {
            "accepted".into()
        } else {
            format!("rejected (session {})", console.session.state().as_str())
        },
    );
    if !ok {
        *all_passed = false;
    }
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}
