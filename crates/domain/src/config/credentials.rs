use serde::{Deserialize, Serialize};

/// Where `va-admin login` stores the admin token in the OS keychain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default = "d_service")]
    pub service: String,
    #[serde(default = "d_account")]
    pub account: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service: d_service(),
            account: d_account(),
        }
    }
}

fn d_service() -> String {
    "voicebot-admin".into()
}
fn d_account() -> String {
    "admin-token".into()
}
