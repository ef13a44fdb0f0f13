//! Video catalog
//!
//! The catalog is the ordered list of indexed videos. It is persisted as one
//! value in a [`CatalogStore`] under [`CATALOG_KEY`] and replaced wholesale on
//! every refresh, so readers always hold a complete version.

pub mod search;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use search::search;
pub use store::{CatalogStore, JsonFileStore, MemoryStore};

/// Store key the catalog lives under
pub const CATALOG_KEY: &str = "videos";

/// Description used when a video has no sidecar text file
pub const DEFAULT_DESCRIPTION: &str = "No Description Provided.";

/// One indexed video file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub ext: String,
}

impl CatalogEntry {
    /// MIME type the file is served with
    pub fn content_type(&self) -> String {
        format!("video/{}", self.ext)
    }
}

/// Outcome of [`Catalog::upsert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
    Unchanged,
}

/// Ordered catalog keyed by file name and id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
    by_file: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its id
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Look up an entry by its on-disk file name
    pub fn get_by_file_name(&self, file_name: &str) -> Option<&CatalogEntry> {
        self.by_file.get(file_name).map(|&i| &self.entries[i])
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Insert an entry, or update the entry with the same file name.
    ///
    /// An existing entry keeps its id and position; only title, description
    /// and extension are replaced.
    pub fn upsert(&mut self, mut entry: CatalogEntry) -> Upsert {
        if let Some(&i) = self.by_file.get(&entry.file_name) {
            let existing = &mut self.entries[i];
            entry.id = existing.id.clone();
            if *existing == entry {
                return Upsert::Unchanged;
            }
            *existing = entry;
            return Upsert::Updated;
        }

        let i = self.entries.len();
        self.by_id.insert(entry.id.clone(), i);
        self.by_file.insert(entry.file_name.clone(), i);
        self.entries.push(entry);
        Upsert::Inserted
    }

    /// Keep only the entries matching the predicate, preserving order.
    /// Returns the number of removed entries.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&CatalogEntry) -> bool,
    {
        let before = self.entries.len();
        let entries: Vec<_> = self.entries.drain(..).filter(|e| keep(e)).collect();
        *self = Self::from(entries);
        before - self.entries.len()
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    /// Builds the indexes. Later duplicates of a file name or id are
    /// dropped, which also repairs catalogs written by append-only indexers.
    fn from(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Catalog::new();
        for entry in entries {
            if catalog.by_file.contains_key(&entry.file_name) || catalog.contains_id(&entry.id) {
                tracing::debug!("Dropping duplicate catalog entry for {}", entry.file_name);
                continue;
            }
            catalog.upsert(entry);
        }
        catalog
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

#[cfg(test)]
pub(crate) fn entry(id: &str, file_name: &str) -> CatalogEntry {
    let (stem, ext) = file_name.rsplit_once('.').unwrap_or((file_name, ""));
    CatalogEntry {
        id: id.to_string(),
        title: stem.to_string(),
        description: DEFAULT_DESCRIPTION.to_string(),
        file_name: file_name.to_string(),
        ext: ext.to_string(),
    }
}
