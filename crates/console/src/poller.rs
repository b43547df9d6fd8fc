//! Background refresh of a [`LogTail`].
//!
//! [`LogPoller::start`] performs one loud refresh straight away, then a
//! quiet refresh every `interval`. The task lives exactly as long as the
//! handle: [`LogPoller::stop`] cancels and joins it, dropping the handle
//! cancels it.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::logs::LogTail;
use crate::RefreshMode;

pub struct LogPoller {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl LogPoller {
    /// Spawn the polling task on the current tokio runtime.
    pub fn start(view: Arc<LogTail>, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = view.refresh(RefreshMode::Loud) => {}
            }

            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = view.refresh(RefreshMode::Quiet) => {}
                }
            }
            tracing::debug!("log poller stopped");
        });

        tracing::debug!(interval_ms = interval.as_millis() as u64, "log poller started");
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "log poller task failed");
            }
        }
    }
}

impl Drop for LogPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
