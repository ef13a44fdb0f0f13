//! Catalog persistence
//!
//! A store maps a key to a catalog version. Versions are immutable and shared
//! as `Arc<Catalog>`; `set` swaps in a new version, so a reader either sees
//! the previous catalog or the new one, never a partial update.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::Catalog;
use crate::error::Result;

/// Durable key -> catalog mapping
pub trait CatalogStore: Send + Sync {
    /// Current version stored under `key`
    fn get(&self, key: &str) -> Option<Arc<Catalog>>;

    /// Publish a new version under `key`
    fn set(&self, key: &str, catalog: Catalog) -> Result<()>;

    /// Store `catalog` only if `key` holds nothing yet.
    /// Returns true when the value was written.
    fn set_if_absent(&self, key: &str, catalog: Catalog) -> Result<bool>;
}

/// Non-durable store, used in tests and when no store path is usable
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, Arc<Catalog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Arc<Catalog>> {
        self.records.get(key).map(|r| r.clone())
    }

    fn set(&self, key: &str, catalog: Catalog) -> Result<()> {
        self.records.insert(key.to_string(), Arc::new(catalog));
        Ok(())
    }

    fn set_if_absent(&self, key: &str, catalog: Catalog) -> Result<bool> {
        let mut inserted = false;
        self.records.entry(key.to_string()).or_insert_with(|| {
            inserted = true;
            Arc::new(catalog)
        });
        Ok(inserted)
    }
}

/// On-disk document layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    updated_at: Option<DateTime<Utc>>,
    records: BTreeMap<String, Catalog>,
}

/// Store backed by a JSON document.
///
/// All records are held in memory and the whole document is rewritten on
/// every change (temp file + rename). The in-memory version is only swapped
/// after the file was written.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: DashMap<String, Arc<Catalog>>,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = DashMap::new();

        match std::fs::read(&path) {
            Ok(data) => {
                let doc: StoreDocument = serde_json::from_slice(&data)?;
                for (key, catalog) in doc.records {
                    records.insert(key, Arc::new(catalog));
                }
                tracing::info!("Loaded catalog store {:?} ({} keys)", path, records.len());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Catalog store {:?} does not exist yet", path);
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            path,
            records,
            write_lock: Mutex::new(()),
        })
    }

    fn persist(&self, key: &str, catalog: &Catalog) -> Result<()> {
        let mut doc = StoreDocument {
            updated_at: Some(Utc::now()),
            records: BTreeMap::new(),
        };
        for r in self.records.iter() {
            doc.records.insert(r.key().clone(), Catalog::clone(r.value()));
        }
        doc.records.insert(key.to_string(), catalog.clone());

        let data = serde_json::to_vec_pretty(&doc)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CatalogStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Arc<Catalog>> {
        self.records.get(key).map(|r| r.clone())
    }

    fn set(&self, key: &str, catalog: Catalog) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.persist(key, &catalog)?;
        self.records.insert(key.to_string(), Arc::new(catalog));
        Ok(())
    }

    fn set_if_absent(&self, key: &str, catalog: Catalog) -> Result<bool> {
        let _guard = self.write_lock.lock();
        if self.records.contains_key(key) {
            return Ok(false);
        }
        self.persist(key, &catalog)?;
        self.records.insert(key.to_string(), Arc::new(catalog));
        Ok(true)
    }
}
