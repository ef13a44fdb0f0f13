//! Directory scanner - reconciles the content directory into the catalog

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::{Catalog, CatalogEntry, CatalogStore, Upsert, CATALOG_KEY};
use crate::config::LibraryConfig;
use crate::error::Result;

use super::metadata::derive;

/// Length of generated video ids
const ID_LEN: usize = 8;

/// Counters for one refresh cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Supported files found on disk
    pub scanned: usize,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    /// Entries dropped because their file is gone (only with `prune_missing`)
    pub removed: usize,
    /// Files whose metadata could not be read this cycle
    pub skipped: usize,
}

/// Keeps the stored catalog in sync with the content directory
pub struct Indexer {
    store: Arc<dyn CatalogStore>,
    library: LibraryConfig,
}

impl Indexer {
    pub fn new(store: Arc<dyn CatalogStore>, library: LibraryConfig) -> Self {
        Self { store, library }
    }

    pub fn library(&self) -> &LibraryConfig {
        &self.library
    }

    /// Run one indexing pass.
    ///
    /// Entries are upserted by file name, so a file keeps its id for as long
    /// as it exists. The new catalog is built aside and published with a
    /// single `set`; on error the stored catalog is left untouched.
    pub fn refresh(&self) -> Result<RefreshReport> {
        self.store.set_if_absent(CATALOG_KEY, Catalog::new())?;

        let files = list_videos(&self.library)?;
        let current = self.store.get(CATALOG_KEY).unwrap_or_default();
        let mut next = Catalog::clone(&current);
        let mut seen = HashSet::new();
        let mut report = RefreshReport::default();

        for file_name in files {
            if !seen.insert(file_name.clone()) {
                continue;
            }
            report.scanned += 1;

            let meta = match derive(&self.library.content_dir, &file_name) {
                Ok(meta) => meta,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", file_name, e);
                    report.skipped += 1;
                    continue;
                }
            };

            let id = match next.get_by_file_name(&file_name) {
                Some(existing) => existing.id.clone(),
                None => new_video_id(&next),
            };

            let entry = CatalogEntry {
                id,
                title: meta.title,
                description: meta.description,
                file_name,
                ext: meta.ext,
            };
            tracing::debug!("Indexed {} as {}", entry.file_name, entry.id);

            match next.upsert(entry) {
                Upsert::Inserted => report.added += 1,
                Upsert::Updated => report.updated += 1,
                Upsert::Unchanged => report.unchanged += 1,
            }
        }

        if self.library.prune_missing {
            report.removed = next.retain(|e| seen.contains(&e.file_name));
        }

        if next != *current {
            self.store.set(CATALOG_KEY, next)?;
        }

        Ok(report)
    }
}

/// Supported video file names in the content directory, sorted.
fn list_videos(library: &LibraryConfig) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(&library.content_dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                tracing::warn!("Skipping non UTF-8 file name {:?}", name);
                continue;
            }
        };
        if !library.is_supported(&file_name) || !is_file(&entry.path()) {
            continue;
        }
        files.push(file_name);
    }

    files.sort();
    Ok(files)
}

fn is_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Short random id not yet used in `catalog`
fn new_video_id(catalog: &Catalog) -> String {
    loop {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        if !catalog.contains_id(&id) {
            return id;
        }
    }
}
