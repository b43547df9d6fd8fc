//! `va-admin logs` — server log table, optionally followed.

use std::sync::Arc;

use va_client::LogEntry;
use va_console::{table, LevelBadge, LogPoller, LogRow, LogTail, RefreshMode, Route};

use crate::context::Console;

pub async fn logs(console: &Console, follow: bool) -> anyhow::Result<()> {
    console.enter(Route::Logs)?;
    let tail = Arc::new(LogTail::new(console.api(), console.notifier()));

    if !follow {
        tail.refresh(RefreshMode::Loud).await?;
        print_table(&tail.rows());
        return Ok(());
    }

    follow_logs(console, tail).await
}

async fn follow_logs(console: &Console, tail: Arc<LogTail>) -> anyhow::Result<()> {
    let mut updates = tail.subscribe();
    let poller = LogPoller::start(tail.clone(), console.config.logs.poll_interval());
    eprintln!(
        "Following logs every {}s (Ctrl+C to stop)",
        console.config.logs.poll_interval_secs
    );

    let mut seen: Vec<LogEntry> = Vec::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = tail.entries();
                let fresh = unseen(&seen, &current);
                // Oldest first so the terminal reads top to bottom.
                for entry in fresh.iter().rev() {
                    println!("{}", follow_line(&LogRow::from(entry)));
                }
                seen = current;
            }
        }
    }

    poller.stop().await;
    Ok(())
}

/// Entries in `current` newer than anything in `previous`. Both lists
/// are newest first. When the newest previously seen entry has scrolled
/// out of the window, everything in `current` counts as new.
fn unseen<'a>(previous: &[LogEntry], current: &'a [LogEntry]) -> &'a [LogEntry] {
    let Some(newest_seen) = previous.first() else {
        return current;
    };
    match current.iter().position(|e| e == newest_seen) {
        Some(i) => &current[..i],
        None => current,
    }
}

fn print_table(rows: &[LogRow]) {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.timestamp.clone(),
                r.level.label().to_owned(),
                r.message.clone(),
                r.location.clone(),
            ]
        })
        .collect();
    print!(
        "{}",
        table::render(&["Time", "Level", "Message", "Location"], &cells, "No logs found")
    );
}

fn follow_line(row: &LogRow) -> String {
    let colour = match row.level {
        LevelBadge::Error => "31",
        LevelBadge::Warning => "33",
        LevelBadge::Info => "34",
        _ => "90",
    };
    format!(
        "{}  \x1B[{colour}m{:<7}\x1B[0m  {}  ({})",
        row.timestamp,
        row.level.label(),
        row.message,
        row.location
    )
}
