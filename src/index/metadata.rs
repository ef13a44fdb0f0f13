//! Per-file metadata derived from the file name and its sidecar text file

use std::io::ErrorKind;
use std::path::Path;

use crate::catalog::DEFAULT_DESCRIPTION;
use crate::error::{Result, VideoPileError};

/// Display metadata for one video file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub ext: String,
}

/// Title for a file name: first character upper-cased, last extension removed.
pub fn title_for(file_name: &str) -> String {
    let mut chars = file_name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    match capitalized.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem.to_string(),
        _ => capitalized,
    }
}

/// Text after the final `.`, empty when there is none.
pub fn extension_of(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}

/// Derive metadata for `file_name` inside `content_dir`.
///
/// The description comes from `<lowercased title>.txt` next to the video. A
/// missing sidecar falls back to the default description; any other read
/// failure is returned for this file only.
pub fn derive(content_dir: &Path, file_name: &str) -> Result<VideoMetadata> {
    let title = title_for(file_name);
    let sidecar = content_dir.join(format!("{}.txt", title.to_lowercase()));

    let description = match std::fs::read(&sidecar) {
        Ok(data) => String::from_utf8_lossy(&data).into_owned(),
        Err(e) if e.kind() == ErrorKind::NotFound => DEFAULT_DESCRIPTION.to_string(),
        Err(source) => {
            return Err(VideoPileError::Metadata {
                file_name: file_name.to_string(),
                source,
            })
        }
    };

    Ok(VideoMetadata {
        title,
        description,
        ext: extension_of(file_name),
    })
}
