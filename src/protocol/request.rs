use std::str::FromStr;

use crate::error::RequestError;

/// Field separator inside a request.
pub const DELIMITER: &str = "::";

/// Conventional filler for fields a command does not use.
pub const NULL: &str = "NULL";

/// A parsed client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SRH_S`: look a title up in the catalog.
    SearchTrack { title: String },
    /// `SRH_P`: list the tracks of a playlist.
    SearchPlaylist { playlist: String },
    /// `SHW_FP`: list the session's playlists.
    ShowPlaylists,
    /// `PLAY_S`: stream a track's file. A `NULL` playlist means the catalog.
    Play { playlist: String, title: String },
    /// `ADD_S`
    AddTrack { playlist: String, title: String },
    /// `DEL_S`
    DeleteTrack { playlist: String, title: String },
    /// `ADD_P`
    AddPlaylist { playlist: String },
    /// `DEL_P`
    DeletePlaylist { playlist: String },
    /// `FLT_Y`
    FilterYear { playlist: String, year: u32 },
    /// `FLT_L`: tracks shorter than `max_minutes`.
    FilterLength { playlist: String, max_minutes: u64 },
    /// `FLT_A`
    FilterAlbum { playlist: String, album: String },
}

impl Command {
    /// Parse `CODE::PLAYLIST::TITLE::EXTRA`.
    ///
    /// All four fields must be present. The message is split at most three
    /// times, so `EXTRA` may itself contain the delimiter.
    pub fn parse(message: &str) -> Result<Self, RequestError> {
        let message = message.trim();
        let fields: Vec<&str> = message.splitn(4, DELIMITER).collect();
        let [code, playlist, title, extra] = fields[..] else {
            return Err(RequestError::MissingFields(fields.len()));
        };

        let playlist = playlist.to_string();
        let title = title.to_string();

        let cmd = match code {
            "SRH_S" => Self::SearchTrack { title },
            "SRH_P" => Self::SearchPlaylist { playlist },
            "SHW_FP" => Self::ShowPlaylists,
            "PLAY_S" => Self::Play { playlist, title },
            "ADD_S" => Self::AddTrack { playlist, title },
            "DEL_S" => Self::DeleteTrack { playlist, title },
            "ADD_P" => Self::AddPlaylist { playlist },
            "DEL_P" => Self::DeletePlaylist { playlist },
            "FLT_Y" => Self::FilterYear {
                playlist,
                year: parse_number("year", extra)?,
            },
            "FLT_L" => Self::FilterLength {
                playlist,
                max_minutes: parse_number("minutes", extra)?,
            },
            "FLT_A" => Self::FilterAlbum {
                playlist,
                album: extra.to_string(),
            },
            other => return Err(RequestError::UnknownCode(other.to_string())),
        };
        Ok(cmd)
    }

    /// The wire code for this command.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SearchTrack { .. } => "SRH_S",
            Self::SearchPlaylist { .. } => "SRH_P",
            Self::ShowPlaylists => "SHW_FP",
            Self::Play { .. } => "PLAY_S",
            Self::AddTrack { .. } => "ADD_S",
            Self::DeleteTrack { .. } => "DEL_S",
            Self::AddPlaylist { .. } => "ADD_P",
            Self::DeletePlaylist { .. } => "DEL_P",
            Self::FilterYear { .. } => "FLT_Y",
            Self::FilterLength { .. } => "FLT_L",
            Self::FilterAlbum { .. } => "FLT_A",
        }
    }
}

impl FromStr for Command {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, RequestError> {
    value
        .trim()
        .parse()
        .map_err(|_| RequestError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
