// Error type shared by the widget layers
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("invalid widget payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("failed to read payload file {path}: {source}")]
    PayloadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("widget configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("unknown widget kind '{0}'")]
    UnknownKind(String),

    #[error("widget runtime has been disconnected")]
    Disconnected,
}
