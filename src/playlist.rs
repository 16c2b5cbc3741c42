//! Per-session playlists.
//!
//! A [`PlaylistStore`] belongs to exactly one session and is never shared,
//! so none of its operations need locking.

mod model;
mod store;

pub use model::Playlist;
pub use store::PlaylistStore;
