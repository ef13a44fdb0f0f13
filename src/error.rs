use thiserror::Error;

/// Main error type for the video library server
#[derive(Error, Debug)]
pub enum VideoPileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog store error: {0}")]
    Store(#[from] serde_json::Error),

    #[error("Metadata error for {file_name}: {source}")]
    Metadata {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, VideoPileError>;
