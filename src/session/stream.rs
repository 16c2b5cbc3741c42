use std::io;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::error::SessionError;
use crate::library::Track;
use crate::protocol::{FrameHeader, Kind, Status};

use super::with_deadline;

const CHUNK: usize = 64 * 1024;

/// Copy `len` bytes of a track's file onto the connection.
///
/// In framed mode an audio header announcing the exact length goes first.
/// The write deadline applies to each chunk, not the whole file.
pub(super) async fn send_file<W>(
    w: &mut W,
    mut file: File,
    len: u64,
    track: &Track,
    framed: bool,
    write_timeout: Option<Duration>,
) -> Result<u64, SessionError>
where
    W: AsyncWrite + Unpin,
{
    if framed {
        let header = FrameHeader::new(Kind::Audio, Status::Ok, len as usize)?;
        with_deadline(write_timeout, header.write_to(w)).await?;
    }

    let mut buf = vec![0u8; CHUNK];
    let mut sent: u64 = 0;
    while sent < len {
        let want = (len - sent).min(CHUNK as u64) as usize;
        let n = file.read(&mut buf[..want]).await?;
        if n == 0 {
            // The header already promised `len` bytes.
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} shrank while streaming", track.path.display()),
            )
            .into());
        }
        with_deadline(write_timeout, w.write_all(&buf[..n])).await?;
        sent += n as u64;
    }
    with_deadline(write_timeout, w.flush()).await?;

    info!(title = %track.title, bytes = sent, "track sent");
    Ok(sent)
}
