use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::reply::Status;

/// Size of the header preceding every framed payload.
pub const HEADER_LEN: usize = 6;

/// What the payload of a frame contains.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Kind {
    Text = b'T',
    Audio = b'A',
}

impl TryFrom<u8> for Kind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'T' => Ok(Self::Text),
            b'A' => Ok(Self::Audio),
            other => Err(other),
        }
    }
}

/// `[kind: u8][status: u8][len: u32 big-endian]`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub kind: Kind,
    pub status: Status,
    pub len: u32,
}

impl FrameHeader {
    pub fn new(kind: Kind, status: Status, len: usize) -> io::Result<Self> {
        let len = u32::try_from(len).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "payload larger than 4 GiB")
        })?;
        Ok(Self { kind, status, len })
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[0] = self.kind as u8;
        buf[1] = self.status.code();
        buf[2..].copy_from_slice(&self.len.to_be_bytes());
        buf
    }

    pub fn decode(buf: [u8; HEADER_LEN]) -> io::Result<Self> {
        let invalid = |what: &str, b: u8| {
            io::Error::new(io::ErrorKind::InvalidData, format!("unknown frame {what}: {b:#04x}"))
        };
        let kind = Kind::try_from(buf[0]).map_err(|b| invalid("kind", b))?;
        let status = Status::try_from(buf[1]).map_err(|b| invalid("status", b))?;
        let len = u32::from_be_bytes([buf[2], buf[3], buf[4], buf[5]]);
        Ok(Self { kind, status, len })
    }

    pub async fn write_to<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        w.write_all(&self.encode()).await
    }

    pub async fn read_from<R>(r: &mut R) -> io::Result<Self>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut buf = [0u8; HEADER_LEN];
        r.read_exact(&mut buf).await?;
        Self::decode(buf)
    }
}

/// Read one whole frame. Meant for clients and tests; the server streams
/// audio payloads instead of buffering them.
pub async fn read_frame<R>(r: &mut R) -> io::Result<(FrameHeader, Vec<u8>)>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let header = FrameHeader::read_from(r).await?;
    let mut payload = vec![0u8; header.len as usize];
    r.read_exact(&mut payload).await?;
    Ok((header, payload))
}
