//! Music library: track metadata, directory scanning and the shared catalog.
//!
//! The catalog is built once by [`Catalog::build`] before the server starts
//! accepting connections and is read-only afterwards.

mod catalog;
mod display;
mod model;
mod scan;

pub use catalog::{Catalog, SUPERPLAYLIST};
pub use display::track_line;
pub use model::{Track, TrackMetadata, UNKNOWN, format_duration};
pub use scan::{LoftyReader, MetadataReader, audio_files};
