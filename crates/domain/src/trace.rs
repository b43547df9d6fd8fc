use serde::Serialize;

/// Structured trace events emitted across all voicebot-admin crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    AdminApiCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    ConfigLoaded {
        fields: usize,
        prompt_chars: usize,
    },
    ConfigSaved {
        fields: usize,
        dropped_blank: usize,
        prompt_chars: usize,
    },
    LogsPolled {
        entries: usize,
        quiet: bool,
    },
    SessionTransition {
        from: String,
        to: String,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "va_event");
    }
}
