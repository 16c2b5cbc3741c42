use crate::error::{PlaylistError, RequestError};

/// Payload sent for every request that cannot be parsed.
pub const INVALID_INPUT: &str = "Invalid Input";

/// Outcome code carried in every framed reply.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    PlaylistNotFound = 1,
    PlaylistAlreadyExists = 2,
    TrackNotFound = 3,
    TrackAlreadyInPlaylist = 4,
    ReadOnlyPlaylist = 5,
    MalformedRequest = 6,
    IoError = 7,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl TryFrom<u8> for Status {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Ok,
            1 => Self::PlaylistNotFound,
            2 => Self::PlaylistAlreadyExists,
            3 => Self::TrackNotFound,
            4 => Self::TrackAlreadyInPlaylist,
            5 => Self::ReadOnlyPlaylist,
            6 => Self::MalformedRequest,
            7 => Self::IoError,
            other => return Err(other),
        })
    }
}

impl From<&PlaylistError> for Status {
    fn from(err: &PlaylistError) -> Self {
        match err {
            PlaylistError::PlaylistNotFound(_) => Self::PlaylistNotFound,
            PlaylistError::PlaylistAlreadyExists(_) => Self::PlaylistAlreadyExists,
            PlaylistError::TrackNotFound(_) => Self::TrackNotFound,
            PlaylistError::TrackAlreadyInPlaylist { .. } => Self::TrackAlreadyInPlaylist,
            PlaylistError::ReadOnlyPlaylist(_) => Self::ReadOnlyPlaylist,
        }
    }
}

/// A text reply: a status plus newline-terminated lines (or a bare message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: Status,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            body: body.into(),
        }
    }

    pub fn with_status(status: Status, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Best-effort reply for a failed operation.
    pub fn failed(err: &PlaylistError, body: impl Into<String>) -> Self {
        Self::with_status(Status::from(err), body)
    }

    pub fn invalid_input() -> Self {
        Self::with_status(Status::MalformedRequest, INVALID_INPUT)
    }

    /// Join lines, terminating each with `\n`. No lines gives an empty body.
    pub fn lines<I, S>(lines: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut body = String::new();
        for line in lines {
            body.push_str(line.as_ref());
            body.push('\n');
        }
        body
    }
}

impl From<&RequestError> for Reply {
    fn from(_: &RequestError) -> Self {
        Self::invalid_input()
    }
}
