//! Data Transfer Objects for the admin REST API.
//!
//! Field names are `snake_case` on the wire, matching the backend.
//! Config objects keep any keys this client does not model in an
//! `extra` map so that a load/save cycle never strips backend settings.

use serde::{Deserialize, Deserializer, Serialize};
use indexmap::IndexMap;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Bot configuration
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /config response and POST /config request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub voice_settings: VoiceSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_enabled: Option<Vec<String>>,
    /// Backend keys not modelled here (e.g. `knowledge_base_file`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub voice_id: String,
    #[serde(default = "default_stability")]
    pub stability: f64,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
    /// Extraction field key -> instruction for the assistant, in the
    /// order the backend stores them.
    #[serde(default)]
    pub dynamic_fields: IndexMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_stability() -> f64 {
    0.5
}

fn default_similarity_boost() -> f64 {
    0.75
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            provider: String::new(),
            voice_id: String::new(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            dynamic_fields: IndexMap::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// POST /config acknowledgment. The backend answers validation failures
/// with a 2xx status and `status = "error"`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAck {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UpdateAck {
    pub fn is_error(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("error"))
    }
}

/// GET /health response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Read-only records
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// GET /orders — one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// GET /leads — one element. Leads come straight from the CRM sheet and
/// carry no status or creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// GET /logs — one element, as written by the backend's JSON log sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub line: u32,
}

/// Sheet-backed ids arrive as either numbers or strings.
fn opt_string_or_number<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bot_config_keeps_unknown_keys() {
        let raw = json!({
            "system_prompt": "Hi",
            "knowledge_base_file": "kb/menu.md",
            "voice_settings": {
                "provider": "11labs",
                "voice_id": "abc",
                "stability": 0.4,
                "similarity_boost": 0.8,
                "dynamic_fields": { "name": "full name" },
                "model": "eleven_turbo_v2"
            },
            "tools_enabled": ["save_lead"]
        });
        let cfg: BotConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(cfg.extra["knowledge_base_file"], "kb/menu.md");
        assert_eq!(cfg.voice_settings.extra["model"], "eleven_turbo_v2");
        assert_eq!(serde_json::to_value(&cfg).unwrap(), raw);
    }

    #[test]
    fn minimal_bot_config_uses_defaults() {
        let cfg: BotConfig = serde_json::from_value(json!({
            "system_prompt": "Hi",
            "voice_settings": { "dynamic_fields": { "name": "full name" } }
        }))
        .unwrap();
        assert_eq!(cfg.voice_settings.stability, 0.5);
        assert_eq!(cfg.voice_settings.similarity_boost, 0.75);
        assert!(cfg.tools_enabled.is_none());
        assert_eq!(cfg.voice_settings.dynamic_fields["name"], "full name");
    }

    #[test]
    fn absent_tools_enabled_is_not_serialized() {
        let v = serde_json::to_value(BotConfig::default()).unwrap();
        assert!(v.get("tools_enabled").is_none());
    }

    #[test]
    fn lead_id_accepts_number() {
        let lead: Lead = serde_json::from_value(json!({
            "id": 17, "customer_name": "Ann", "phone": "+100"
        }))
        .unwrap();
        assert_eq!(lead.id.as_deref(), Some("17"));
        assert!(lead.notes.is_none());
    }

    #[test]
    fn log_entry_tolerates_missing_location() {
        let e: LogEntry = serde_json::from_value(json!({
            "timestamp": "2024-05-01T10:00:00", "message": "boot"
        }))
        .unwrap();
        assert!(e.level.is_none());
        assert_eq!(e.line, 0);
    }

    #[test]
    fn update_ack_error_detection() {
        let ack: UpdateAck =
            serde_json::from_value(json!({"status": "error", "message": "bad"})).unwrap();
        assert!(ack.is_error());
        let ok: UpdateAck = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(!ok.is_error());
    }
}
