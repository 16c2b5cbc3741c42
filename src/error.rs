//! Error types shared across the server.
//!
//! Domain errors never close a session: the dispatcher converts them into a
//! reply status and a best-effort payload. Only `SessionError` ends a
//! connection.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of playlist store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("playlist already exists: {0}")]
    PlaylistAlreadyExists(String),

    #[error("track not found: {0}")]
    TrackNotFound(String),

    #[error("track {title:?} is already in playlist {playlist:?}")]
    TrackAlreadyInPlaylist { playlist: String, title: String },

    /// The catalog playlist can be read but never mutated.
    #[error("playlist is read-only: {0}")]
    ReadOnlyPlaylist(String),
}

/// A request that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("expected 4 fields, got {0}")]
    MissingFields(usize),

    #[error("unknown command code: {0}")]
    UnknownCode(String),

    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("request is not valid UTF-8")]
    NotUtf8,

    #[error("request exceeds {0} bytes")]
    TooLong(usize),
}

/// Fatal catalog build failures. Per-file problems are logged, not returned.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("library root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to walk library root: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Why metadata could not be read from a single file.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("unreadable audio file: {0}")]
    Read(String),
}

/// Errors that terminate a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("client idle for longer than the read deadline")]
    IdleTimeout,

    #[error("reply write exceeded the write deadline")]
    WriteTimeout,
}
