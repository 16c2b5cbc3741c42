//! Maps a parsed request onto the playlist store.
//!
//! Domain errors stop here: each one is logged and turned into a reply
//! whose status names the failure and whose body is the best partial
//! answer available.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::TrackField;
use crate::error::PlaylistError;
use crate::library::{Track, track_line};
use crate::playlist::{Playlist, PlaylistStore};
use crate::protocol::{Command, NULL, Reply};

/// What the session must do to answer a request.
#[derive(Debug)]
pub enum Action {
    Reply(Reply),
    Stream(Arc<Track>),
}

/// How tracks are rendered in enumeration replies.
#[derive(Debug, Clone)]
pub struct LineFormat {
    pub fields: Vec<TrackField>,
    pub separator: String,
}

impl LineFormat {
    pub fn tracks<'a, I>(&self, tracks: I) -> String
    where
        I: IntoIterator<Item = &'a Arc<Track>>,
    {
        Reply::lines(
            tracks
                .into_iter()
                .map(|t| track_line(t, &self.fields, &self.separator)),
        )
    }
}

/// `name trackCount` for every playlist in the store.
fn enumerate(store: &PlaylistStore) -> String {
    Reply::lines(store.playlists().map(|p| format!("{} {}", p.name(), p.len())))
}

fn logged(code: &str, err: &PlaylistError) {
    warn!(code, error = %err, "request failed");
}

pub fn dispatch(store: &mut PlaylistStore, format: &LineFormat, cmd: Command) -> Action {
    let code = cmd.code();
    debug!(code, "dispatching");

    let reply = match cmd {
        Command::SearchTrack { title } => match store.catalog().get(&title) {
            Some(track) => Reply::ok(format.tracks([track])),
            None => {
                let err = PlaylistError::TrackNotFound(title);
                logged(code, &err);
                Reply::failed(&err, err.to_string())
            }
        },

        Command::SearchPlaylist { playlist } => match store.find_playlist(&playlist) {
            Ok(p) => Reply::ok(format.tracks(p.tracks())),
            Err(err) => {
                logged(code, &err);
                Reply::failed(&err, "")
            }
        },

        Command::ShowPlaylists => Reply::ok(enumerate(store)),

        Command::Play { playlist, title } => {
            let found = if playlist == NULL {
                store
                    .catalog()
                    .get(&title)
                    .cloned()
                    .ok_or(PlaylistError::TrackNotFound(title))
            } else {
                store
                    .find_track(&playlist, &title)
                    .map(|(_, track, _)| Arc::clone(track))
            };
            match found {
                Ok(track) => return Action::Stream(track),
                Err(err) => {
                    logged(code, &err);
                    Reply::failed(&err, err.to_string())
                }
            }
        }

        Command::AddTrack { playlist, title } => {
            playlist_reply(store, format, code, &playlist, |s| s.add_track(&playlist, &title))
        }

        Command::DeleteTrack { playlist, title } => {
            playlist_reply(store, format, code, &playlist, |s| s.remove_track(&playlist, &title))
        }

        Command::AddPlaylist { playlist } => {
            let result = store.create_playlist(&playlist).map(|_| ());
            enumeration_reply(store, code, result)
        }

        Command::DeletePlaylist { playlist } => {
            let result = store.delete_playlist(&playlist).map(|_| ());
            enumeration_reply(store, code, result)
        }

        Command::FilterYear { playlist, year } => {
            filter_reply(format, code, store.filter_by_year(&playlist, year))
        }

        Command::FilterLength {
            playlist,
            max_minutes,
        } => filter_reply(
            format,
            code,
            store.filter_by_max_duration(&playlist, max_minutes),
        ),

        Command::FilterAlbum { playlist, album } => {
            filter_reply(format, code, store.filter_by_album(&playlist, &album))
        }
    };

    Action::Reply(reply)
}

/// Reply for a track mutation: the updated playlist, or on failure the
/// playlist as it stands (empty if it does not exist).
fn playlist_reply<F>(
    store: &mut PlaylistStore,
    format: &LineFormat,
    code: &str,
    name: &str,
    op: F,
) -> Reply
where
    F: FnOnce(&mut PlaylistStore) -> Result<&Playlist, PlaylistError>,
{
    match op(store).map(|p| format.tracks(p.tracks())) {
        Ok(body) => Reply::ok(body),
        Err(err) => {
            logged(code, &err);
            let current = store
                .find_playlist(name)
                .map(|p| format.tracks(p.tracks()))
                .unwrap_or_default();
            Reply::failed(&err, current)
        }
    }
}

/// Playlist mutations always answer with the full enumeration.
fn enumeration_reply(store: &PlaylistStore, code: &str, result: Result<(), PlaylistError>) -> Reply {
    match result {
        Ok(()) => Reply::ok(enumerate(store)),
        Err(err) => {
            logged(code, &err);
            Reply::failed(&err, enumerate(store))
        }
    }
}

fn filter_reply(
    format: &LineFormat,
    code: &str,
    result: Result<Vec<Arc<Track>>, PlaylistError>,
) -> Reply {
    match result {
        Ok(tracks) => Reply::ok(format.tracks(&tracks)),
        Err(err) => {
            logged(code, &err);
            Reply::failed(&err, "")
        }
    }
}
