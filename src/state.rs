//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - Server configuration
//! - The catalog store shared with the indexer

use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogEntry, CatalogStore, CATALOG_KEY};

#[cfg(test)]
use crate::catalog::MemoryStore;
use crate::config::ServerConfig;

/// Application state shared across all handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,

    /// Catalog store, written by the indexer
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Create a new AppState with the given configuration and store
    pub fn new(config: ServerConfig, store: Arc<dyn CatalogStore>) -> Self {
        Self { config, store }
    }

    /// Create AppState with default configuration and an in-memory store
    #[cfg(test)]
    pub fn with_defaults() -> Self {
        Self::new(ServerConfig::default(), Arc::new(MemoryStore::new()))
    }

    /// Current catalog version; empty before the first refresh
    pub fn catalog(&self) -> Arc<Catalog> {
        self.store.get(CATALOG_KEY).unwrap_or_default()
    }

    /// Location of an entry's file on disk
    pub fn video_path(&self, entry: &CatalogEntry) -> PathBuf {
        self.config.library.content_dir.join(&entry.file_name)
    }
}
