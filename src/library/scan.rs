use std::path::{Path, PathBuf};

use lofty::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{CatalogError, MetadataError};

use super::model::TrackMetadata;

/// Source of per-file metadata used while building the catalog.
pub trait MetadataReader {
    fn read(&self, path: &Path) -> Result<TrackMetadata, MetadataError>;
}

/// Reads tags and audio properties with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl MetadataReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<TrackMetadata, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Read(e.to_string()))?;

        let mut meta = TrackMetadata {
            duration: tagged.properties().duration(),
            ..TrackMetadata::default()
        };

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            meta.title = tag.title().map(|v| v.into_owned());
            meta.artist = tag.artist().map(|v| v.into_owned());
            meta.album = tag.album().map(|v| v.into_owned());
            meta.genre = tag.genre().map(|v| v.into_owned());
            meta.year = tag.year();
        }

        Ok(meta)
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List audio files under `root` in file-name order.
///
/// Only a missing or unreadable root is fatal; unreadable entries below it
/// are logged and skipped.
pub fn audio_files(root: &Path, settings: &LibrarySettings) -> Result<Vec<PathBuf>, CatalogError> {
    if !root.is_dir() {
        return Err(CatalogError::RootNotFound(root.to_path_buf()));
    }

    let mut walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .sort_by_file_name();

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, "skipping unreadable library entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_audio_file(path, settings) {
            files.push(path.to_path_buf());
        } else {
            debug!(path = %path.display(), "ignoring non-audio file");
        }
    }

    Ok(files)
}
