//! Configuration file support
//!
//! Loads server configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{LibraryConfig, ServerConfig, StreamConfig};
use crate::error::{Result, VideoPileError};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: ServerSettings,
    /// Library settings
    pub library: LibrarySettings,
    /// Streaming settings
    pub stream: Option<StreamSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
    /// Directory with the page shells
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySettings {
    /// Directory holding the videos
    pub content_dir: PathBuf,
    /// Indexed extensions
    pub extensions: Option<Vec<String>>,
    /// Seconds between refreshes
    pub refresh_interval_secs: Option<u64>,
    /// Catalog persistence file
    pub store_path: Option<PathBuf>,
    /// Drop entries for files that disappeared
    pub prune_missing: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    pub chunk_size: Option<usize>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| VideoPileError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| VideoPileError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ServerConfig::default();
        Self {
            server: ServerSettings {
                host: defaults.host,
                port: defaults.port,
                cors_enabled: Some(defaults.cors_enabled),
                static_dir: Some(defaults.static_dir),
            },
            library: LibrarySettings {
                content_dir: defaults.library.content_dir,
                extensions: Some(defaults.library.extensions),
                refresh_interval_secs: Some(defaults.library.refresh_interval_secs),
                store_path: Some(defaults.library.store_path),
                prune_missing: Some(defaults.library.prune_missing),
            },
            stream: Some(StreamSettings {
                chunk_size: Some(defaults.stream.chunk_size),
                idle_timeout_secs: Some(defaults.stream.idle_timeout_secs),
            }),
            logging: Some(LoggingSettings {
                level: defaults.log_level,
                format: Some(defaults.log_format),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let library_defaults = LibraryConfig::default();
        let stream_defaults = StreamConfig::default();
        let stream = self.stream.unwrap_or(StreamSettings {
            chunk_size: None,
            idle_timeout_secs: None,
        });

        ServerConfig {
            host: self.server.host,
            port: self.server.port,
            library: LibraryConfig {
                content_dir: self.library.content_dir,
                extensions: self
                    .library
                    .extensions
                    .unwrap_or(library_defaults.extensions),
                refresh_interval_secs: self
                    .library
                    .refresh_interval_secs
                    .unwrap_or(library_defaults.refresh_interval_secs),
                store_path: self.library.store_path.unwrap_or(library_defaults.store_path),
                prune_missing: self.library.prune_missing.unwrap_or(false),
            },
            stream: StreamConfig {
                chunk_size: stream.chunk_size.unwrap_or(stream_defaults.chunk_size),
                idle_timeout_secs: stream
                    .idle_timeout_secs
                    .unwrap_or(stream_defaults.idle_timeout_secs),
            },
            static_dir: self.server.static_dir.unwrap_or(defaults.static_dir),
            cors_enabled: self.server.cors_enabled.unwrap_or(true),
            log_level: self
                .logging
                .as_ref()
                .map(|l| l.level.clone())
                .unwrap_or(defaults.log_level),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or(defaults.log_format),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    ConfigFile::default_config().to_file(path)
}
