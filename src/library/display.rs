use crate::config::TrackField;

use super::model::{Track, format_duration};

/// Build the reply line for a track according to the provided `fields` and separator.
///
/// Fields that render empty are skipped. Falls back to `title` when no parts
/// were produced. The result carries no trailing newline.
pub fn track_line(track: &Track, fields: &[TrackField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        let part = match f {
            TrackField::Title => track.title.clone(),
            TrackField::Artist => track.artist.clone(),
            TrackField::Album => track.album.clone(),
            TrackField::Genre => track.genre.clone(),
            TrackField::Year => track.year.map(|y| y.to_string()).unwrap_or_default(),
            TrackField::Duration => format_duration(track.duration),
            TrackField::Filename => track
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string(),
            TrackField::Path => track.path.display().to_string(),
        };
        if !part.trim().is_empty() {
            parts.push(part);
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
