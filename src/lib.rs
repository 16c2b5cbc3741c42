//! allegro: a small media server sharing one music directory over TCP.
//!
//! The catalog is scanned once at startup ([`library::Catalog`]) and then
//! shared read-only by every connection. Each connection gets a
//! [`session::Session`] with private playlists, driven by short
//! `CODE::PLAYLIST::TITLE::EXTRA` requests ([`protocol::Command`]).

pub mod config;
pub mod error;
pub mod library;
pub mod playlist;
pub mod protocol;
pub mod server;
pub mod session;
