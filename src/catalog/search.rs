use super::{Catalog, CatalogEntry};

/// Case-insensitive substring match against entry titles.
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a CatalogEntry> {
    let needle = query.to_lowercase();
    catalog
        .entries()
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .collect()
}
