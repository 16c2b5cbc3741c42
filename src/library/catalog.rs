use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::LibrarySettings;
use crate::error::CatalogError;
use crate::playlist::Playlist;

use super::model::Track;
use super::scan::{MetadataReader, audio_files};

/// Name under which the catalog is reachable as a read-only playlist.
pub const SUPERPLAYLIST: &str = "SUPERPLAYLIST";

/// Every track found at startup, keyed by title.
///
/// There is no way to mutate a catalog once built; sessions share it
/// through an `Arc`.
#[derive(Debug)]
pub struct Catalog {
    all: Playlist,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    /// Scan `settings.root` and read metadata for every audio file found.
    ///
    /// Files whose metadata cannot be read, and files repeating a title
    /// already in the catalog, are logged and skipped.
    pub fn build<R>(settings: &LibrarySettings, reader: &R) -> Result<Self, CatalogError>
    where
        R: MetadataReader + ?Sized,
    {
        let files = audio_files(&settings.root, settings)?;
        let scanned = files.len();

        let mut tracks = Vec::with_capacity(scanned);
        for path in files {
            match reader.read(&path) {
                Ok(meta) => tracks.push(Track::from_metadata(&path, meta)),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable track"),
            }
        }

        let catalog = Self::from_tracks(tracks);
        if catalog.is_empty() {
            warn!(root = %settings.root.display(), scanned, "no playable tracks found");
        }
        info!(
            root = %settings.root.display(),
            scanned,
            tracks = catalog.len(),
            "catalog built"
        );
        Ok(catalog)
    }

    /// Build from already-extracted tracks. The first track with a given
    /// title wins; later duplicates are dropped with a warning.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut kept: Vec<Arc<Track>> = Vec::new();
        let mut by_title = HashMap::new();

        for track in tracks {
            if let Some(&existing) = by_title.get(&track.title) {
                let first: &Arc<Track> = &kept[existing];
                warn!(
                    title = %track.title,
                    path = %track.path.display(),
                    kept = %first.path.display(),
                    "duplicate title, skipping"
                );
                continue;
            }
            by_title.insert(track.title.clone(), kept.len());
            kept.push(Arc::new(track));
        }

        Self {
            all: Playlist::with_tracks(SUPERPLAYLIST, kept),
            by_title,
        }
    }

    pub fn get(&self, title: &str) -> Option<&Arc<Track>> {
        self.by_title.get(title).map(|&i| &self.all.tracks()[i])
    }

    /// The catalog viewed as the `SUPERPLAYLIST` playlist.
    pub fn playlist(&self) -> &Playlist {
        &self.all
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
