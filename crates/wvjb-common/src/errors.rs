use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Unrecoverable conditions for a bridge's protocol handshake.
///
/// These are published as [`crate::BridgeEvent::FatalError`]. The bridge never
/// retries; callers decide whether to recreate it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum FatalError {
    #[error("failed to inject the JavaScript counterpart: {0}")]
    InjectionFailed(String),

    #[error("failed to fetch the message queue from the web content: {0}")]
    QueueFetchFailed(String),

    #[error("web content process terminated")]
    ContentProcessTerminated,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("transport dropped")]
    TransportDropped,

    #[error("invalid message queue: {0}")]
    InvalidMessageQueue(String),
}
