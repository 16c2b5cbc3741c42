use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level server settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/allegro/config.toml` or `~/.config/allegro/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ALLEGRO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub library: LibrarySettings,
    pub display: DisplaySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address the acceptor binds to.
    pub listen: String,
    /// How requests and replies are delimited on the connection.
    pub framing: Framing,
    /// Bytes read per request in raw framing.
    pub read_buffer: usize,
    /// Longest accepted request line in framed mode (bytes).
    pub max_request_len: usize,
    /// Close a session after this many seconds without a request.
    /// Set to 0 to wait forever.
    pub idle_timeout_secs: u64,
    /// Abort a reply that takes longer than this many seconds to write.
    /// Set to 0 to disable.
    pub write_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8081".to_string(),
            framing: Framing::Framed,
            read_buffer: 10_000,
            max_request_len: 4096,
            idle_timeout_secs: 300,
            write_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// Newline-terminated requests, length-prefixed tagged replies.
    Framed,
    /// One request per socket read, unframed replies. `PLAY_S` closes the
    /// connection after the file has been sent.
    #[serde(alias = "legacy")]
    Raw,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackField {
    Title,
    Artist,
    Album,
    Genre,
    Year,
    Duration,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Which track fields make up one line of an enumeration reply, and in what order.
    ///
    /// Example: ["title", "artist", "album", "duration"]
    pub track_fields: Vec<TrackField>,
    /// Separator used to join `track_fields`.
    pub track_separator: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            track_fields: vec![
                TrackField::Title,
                TrackField::Artist,
                TrackField::Album,
                TrackField::Duration,
            ],
            track_separator: " ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned once at startup.
    pub root: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("mp3_files"),
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive. `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "allegro=info".to_string(),
        }
    }
}
