use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::PlaylistError;
use crate::library::{Catalog, SUPERPLAYLIST, Track};
use crate::protocol::NULL;

use super::model::Playlist;

type Result<T> = std::result::Result<T, PlaylistError>;

/// The playlists owned by one session.
///
/// Tracks enter a playlist only by title lookup in the shared catalog, so
/// every entry is a reference to catalog data. The catalog itself is
/// reachable under [`SUPERPLAYLIST`] for reads only.
#[derive(Debug)]
pub struct PlaylistStore {
    catalog: Arc<Catalog>,
    playlists: IndexMap<String, Playlist>,
}

impl PlaylistStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            playlists: IndexMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Session playlists in creation order. The catalog is not included.
    pub fn playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.values()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn find_playlist(&self, name: &str) -> Result<&Playlist> {
        if name == SUPERPLAYLIST {
            return Ok(self.catalog.playlist());
        }
        self.playlists
            .get(name)
            .ok_or_else(|| PlaylistError::PlaylistNotFound(name.to_string()))
    }

    /// Locate `title` inside playlist `name`, returning its index there.
    pub fn find_track(&self, name: &str, title: &str) -> Result<(&Playlist, &Arc<Track>, usize)> {
        let playlist = self.find_playlist(name)?;
        let index = playlist
            .position(title)
            .ok_or_else(|| PlaylistError::TrackNotFound(title.to_string()))?;
        Ok((playlist, &playlist.tracks()[index], index))
    }

    /// `SUPERPLAYLIST` and the `NULL` placeholder are taken: both already
    /// stand for the catalog.
    pub fn create_playlist(&mut self, name: &str) -> Result<&Playlist> {
        if name == SUPERPLAYLIST || name == NULL || self.playlists.contains_key(name) {
            return Err(PlaylistError::PlaylistAlreadyExists(name.to_string()));
        }
        let entry = self
            .playlists
            .entry(name.to_string())
            .or_insert_with(|| Playlist::new(name));
        Ok(&*entry)
    }

    /// Remove playlist `name`; the remaining playlists keep their order.
    pub fn delete_playlist(&mut self, name: &str) -> Result<Playlist> {
        if name == SUPERPLAYLIST {
            return Err(PlaylistError::ReadOnlyPlaylist(name.to_string()));
        }
        self.playlists
            .shift_remove(name)
            .ok_or_else(|| PlaylistError::PlaylistNotFound(name.to_string()))
    }

    /// Append the catalog track titled `title` to playlist `name`.
    pub fn add_track(&mut self, name: &str, title: &str) -> Result<&Playlist> {
        let track = self
            .catalog
            .get(title)
            .cloned()
            .ok_or_else(|| PlaylistError::TrackNotFound(title.to_string()))?;

        let playlist = self.playlist_mut(name)?;
        if playlist.contains(title) {
            return Err(PlaylistError::TrackAlreadyInPlaylist {
                playlist: name.to_string(),
                title: title.to_string(),
            });
        }
        playlist.push(track);
        Ok(&*playlist)
    }

    pub fn remove_track(&mut self, name: &str, title: &str) -> Result<&Playlist> {
        let playlist = self.playlist_mut(name)?;
        let index = playlist
            .position(title)
            .ok_or_else(|| PlaylistError::TrackNotFound(title.to_string()))?;
        playlist.remove(index);
        Ok(&*playlist)
    }

    pub fn filter_by_year(&self, name: &str, year: u32) -> Result<Vec<Arc<Track>>> {
        Ok(self.find_playlist(name)?.filter(|t| t.year == Some(year)))
    }

    /// Tracks strictly shorter than `max_minutes` whole minutes.
    pub fn filter_by_max_duration(&self, name: &str, max_minutes: u64) -> Result<Vec<Arc<Track>>> {
        let bound = Duration::from_secs(max_minutes.saturating_mul(60));
        Ok(self.find_playlist(name)?.filter(|t| t.duration < bound))
    }

    /// Exact, case-sensitive album match.
    pub fn filter_by_album(&self, name: &str, album: &str) -> Result<Vec<Arc<Track>>> {
        Ok(self.find_playlist(name)?.filter(|t| t.album == album))
    }

    fn playlist_mut(&mut self, name: &str) -> Result<&mut Playlist> {
        if name == SUPERPLAYLIST {
            return Err(PlaylistError::ReadOnlyPlaylist(name.to_string()));
        }
        self.playlists
            .get_mut(name)
            .ok_or_else(|| PlaylistError::PlaylistNotFound(name.to_string()))
    }
}
