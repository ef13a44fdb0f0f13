//! Catalog indexing
//!
//! This module keeps the catalog in sync with the content directory:
//! - Metadata derivation from file names and sidecar descriptions
//! - Directory scanning with upsert-by-file-name reconciliation
//! - The startup pass and the periodic refresh task

pub mod metadata;
pub mod scanner;
pub mod schedule;

pub use scanner::{Indexer, RefreshReport};
pub use schedule::{refresh_now, spawn_periodic_refresh};
