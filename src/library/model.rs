use std::path::{Path, PathBuf};
use std::time::Duration;

/// Stand-in for artist, album and genre when a tag is missing.
pub const UNKNOWN: &str = "Unknown";

/// Descriptive metadata pulled out of one audio file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u32>,
    pub duration: Duration,
}

/// One catalog entry. Built once during the scan and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub year: Option<u32>,
    pub duration: Duration,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl Track {
    /// Build a track, falling back to the file stem for a missing title.
    pub fn from_metadata(path: &Path, meta: TrackMetadata) -> Self {
        let title = non_empty(meta.title).unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN")
                .to_string()
        });

        Self {
            path: path.to_path_buf(),
            title,
            artist: non_empty(meta.artist).unwrap_or_else(|| UNKNOWN.to_string()),
            album: non_empty(meta.album).unwrap_or_else(|| UNKNOWN.to_string()),
            genre: non_empty(meta.genre).unwrap_or_else(|| UNKNOWN.to_string()),
            year: meta.year,
            duration: meta.duration,
        }
    }
}

/// Render a duration truncated to whole seconds, e.g. `3m36s`, `1h2m0s`, `45s`.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}
