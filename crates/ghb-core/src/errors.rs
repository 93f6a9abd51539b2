/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so handlers can
/// treat failures consistently (user-facing reply vs log-only).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("platform error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
