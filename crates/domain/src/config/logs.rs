use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Log tail view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    /// Seconds between quiet background refreshes while following logs.
    #[serde(default = "d_5")]
    pub poll_interval_secs: u64,
}

impl LogsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
        }
    }
}

fn d_5() -> u64 {
    5
}
