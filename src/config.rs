//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Video library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding the video files and their description sidecars
    pub content_dir: PathBuf,

    /// File extensions (without the dot) that are indexed
    pub extensions: Vec<String>,

    /// Seconds between catalog refreshes
    pub refresh_interval_secs: u64,

    /// Where the catalog is persisted
    pub store_path: PathBuf,

    /// Drop catalog entries whose file has disappeared
    pub prune_missing: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("./videos"),
            extensions: vec!["mp4".to_string()],
            refresh_interval_secs: 120,
            store_path: PathBuf::from("./videopile.json"),
            prune_missing: false,
        }
    }
}

impl LibraryConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    /// Check whether a file name carries one of the indexed extensions
    pub fn is_supported(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(&format!(".{}", ext)))
    }
}

/// File streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Read size per body chunk in bytes
    pub chunk_size: usize,

    /// A transfer that makes no progress for this long is aborted
    pub idle_timeout_secs: u64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
            idle_timeout_secs: 30,
        }
    }
}

impl StreamConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Library configuration
    pub library: LibraryConfig,

    /// Streaming configuration
    pub stream: StreamConfig,

    /// Directory with the HTML page shells and the `public` assets
    pub static_dir: PathBuf,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4242,
            library: LibraryConfig::default(),
            stream: StreamConfig::default(),
            static_dir: PathBuf::from("./static"),
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
