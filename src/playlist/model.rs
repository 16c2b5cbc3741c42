use std::sync::Arc;

use crate::library::Track;

/// A named, ordered list of references into the catalog.
#[derive(Debug, Clone)]
pub struct Playlist {
    name: String,
    tracks: Vec<Arc<Track>>,
}

impl Playlist {
    /// Create an empty playlist.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    pub(crate) fn with_tracks(name: impl Into<String>, tracks: Vec<Arc<Track>>) -> Self {
        Self {
            name: name.into(),
            tracks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tracks in insertion order.
    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the first track with this title.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.title == title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// Tracks matching `pred`, in playlist order.
    pub fn filter<F>(&self, mut pred: F) -> Vec<Arc<Track>>
    where
        F: FnMut(&Track) -> bool,
    {
        self.tracks.iter().filter(|t| pred(t.as_ref())).cloned().collect()
    }

    pub(crate) fn push(&mut self, track: Arc<Track>) {
        self.tracks.push(track);
    }

    /// Remove by index, keeping the relative order of the rest.
    pub(crate) fn remove(&mut self, index: usize) -> Arc<Track> {
        self.tracks.remove(index)
    }
}
