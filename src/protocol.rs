//! Wire protocol: `CODE::PLAYLIST::TITLE::EXTRA` requests and their replies.
//!
//! Replies are either written raw (legacy clients) or wrapped in a frame
//! carrying a kind tag, a status code and the payload length.

mod frame;
mod reply;
mod request;

pub use frame::{FrameHeader, HEADER_LEN, Kind, read_frame};
pub use reply::{INVALID_INPUT, Reply, Status};
pub use request::{Command, DELIMITER, NULL};

#[cfg(test)]
mod tests;
