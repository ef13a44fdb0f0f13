//! VideoPile
//!
//! Serves a directory of video files over HTTP. The directory is indexed into
//! a searchable catalog at startup and on a fixed interval, and files are
//! streamed with byte-range support for seeking media players.

mod catalog;
mod config;
mod config_file;
mod error;
mod http;
mod index;
mod state;
mod stream;

#[cfg(test)]
mod integration;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{CatalogStore, JsonFileStore, MemoryStore};
use crate::config::ServerConfig;
use crate::error::{Result, VideoPileError};
use crate::http::create_router;
use crate::index::{refresh_now, spawn_periodic_refresh, Indexer};
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "videopile";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    // `videopile --write-config [path]` writes a starter config and exits
    if first.as_deref() == Some("--write-config") {
        let path = args.next().unwrap_or_else(|| "config.toml".to_string());
        crate::config_file::generate_default_config(&path)?;
        println!("Wrote default configuration to {}", path);
        return Ok(());
    }

    // Load configuration
    let config_path = first.unwrap_or_else(|| "config.toml".to_string());
    let (mut config, config_error) = if std::path::Path::new(&config_path).exists() {
        match crate::config_file::ConfigFile::from_file(&config_path) {
            Ok(cf) => (cf.into_server_config(), None),
            Err(e) => (ServerConfig::default(), Some(e)),
        }
    } else {
        (ServerConfig::default(), None)
    };

    // Initialize logging
    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(e) = config_error {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            config_path,
            e
        );
    }

    match config.library.content_dir.canonicalize() {
        Ok(dir) => config.library.content_dir = dir,
        Err(e) => tracing::warn!(
            "Content directory {:?} is not accessible yet: {}",
            config.library.content_dir,
            e
        ),
    }
    tracing::info!("Configuration loaded: {:?}", config);

    let store: Arc<dyn CatalogStore> = match JsonFileStore::open(&config.library.store_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(
                "Failed to open catalog store {:?}: {}. Catalog will not be persisted.",
                config.library.store_path,
                e
            );
            Arc::new(MemoryStore::new())
        }
    };

    // Index once before accepting traffic, then keep refreshing
    let indexer = Arc::new(Indexer::new(store.clone(), config.library.clone()));
    refresh_now(Arc::clone(&indexer)).await;
    spawn_periodic_refresh(indexer, config.library.refresh_interval());

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), store));
    if state.catalog().is_empty() {
        tracing::warn!("No videos found in {:?}", config.library.content_dir);
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| VideoPileError::Config(format!("invalid listen address: {}", e)))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "videopile={0},tower_http={0}",
            config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
