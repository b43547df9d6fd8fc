/// Shared error type used across all voicebot-admin crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status that is not an auth failure.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("auth: {0}")]
    Auth(String),

    /// The backend acknowledged the request but refused it
    /// (e.g. `{"status": "error", "message": "..."}` on a config update).
    #[error("rejected by backend: {0}")]
    Rejected(String),

    #[error("config: {0}")]
    Config(String),

    #[error("configuration has not been loaded")]
    NotLoaded,

    #[error("a save is already in flight")]
    SaveInFlight,

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
