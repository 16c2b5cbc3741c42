//! One connected client: its playlists and the request/reply loop.
//!
//! A session owns its [`PlaylistStore`] outright and only reads the shared
//! catalog. Requests are handled strictly in arrival order. Domain errors
//! are answered and the loop goes on; only connection failures, deadlines
//! and client disconnects end it.

mod dispatch;
mod stream;

use std::future::Future;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::config::{Framing, Settings};
use crate::error::{RequestError, SessionError};
use crate::library::Catalog;
use crate::playlist::PlaylistStore;
use crate::protocol::{Command, FrameHeader, Kind, Reply, Status};

pub use dispatch::{Action, LineFormat, dispatch};

/// Per-connection knobs, shared by every session of a server.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub framing: Framing,
    pub read_buffer: usize,
    pub max_request_len: usize,
    pub idle_timeout: Option<Duration>,
    pub write_timeout: Option<Duration>,
    pub format: LineFormat,
}

fn secs(n: u64) -> Option<Duration> {
    (n > 0).then(|| Duration::from_secs(n))
}

impl From<&Settings> for SessionOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            framing: settings.server.framing,
            read_buffer: settings.server.read_buffer.max(1),
            max_request_len: settings.server.max_request_len.max(1),
            idle_timeout: secs(settings.server.idle_timeout_secs),
            write_timeout: secs(settings.server.write_timeout_secs),
            format: LineFormat {
                fields: settings.display.track_fields.clone(),
                separator: settings.display.track_separator.clone(),
            },
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Run `fut` under an optional write deadline.
pub(crate) async fn with_deadline<F, T>(limit: Option<Duration>, fut: F) -> Result<T, SessionError>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(d) => match tokio::time::timeout(d, fut).await {
            Ok(res) => res.map_err(SessionError::from),
            Err(_) => Err(SessionError::WriteTimeout),
        },
        None => fut.await.map_err(SessionError::from),
    }
}

enum Flow {
    Continue,
    Close,
}

enum Message {
    Request(Vec<u8>),
    /// A framed line over `max_request_len`; its bytes have been dropped.
    TooLong,
}

/// Open a track file and learn its length. Anything but a regular file is
/// refused, since its length cannot be announced up front.
async fn open_track(path: &Path) -> io::Result<(File, u64)> {
    let file = File::open(path).await?;
    let meta = file.metadata().await?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    Ok((file, meta.len()))
}

pub struct Session<S> {
    conn: BufReader<S>,
    store: PlaylistStore,
    options: Arc<SessionOptions>,
    served: usize,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(conn: S, catalog: Arc<Catalog>, options: Arc<SessionOptions>) -> Self {
        Self {
            conn: BufReader::new(conn),
            store: PlaylistStore::new(catalog),
            options,
            served: 0,
        }
    }

    /// Serve requests until the client goes away.
    ///
    /// Returns the number of requests answered.
    pub async fn run(mut self) -> Result<usize, SessionError> {
        info!("session started");
        let result = self.serve().await;
        match &result {
            Ok(()) => info!(requests = self.served, "session closed"),
            Err(err) => warn!(requests = self.served, error = %err, "session aborted"),
        }
        // Best effort; the peer may already be gone.
        let _ = self.conn.shutdown().await;
        result.map(|()| self.served)
    }

    async fn serve(&mut self) -> Result<(), SessionError> {
        while let Some(message) = self.next_request().await? {
            self.served += 1;
            let flow = match message {
                Message::Request(bytes) => self.handle(&bytes).await?,
                Message::TooLong => {
                    let err = RequestError::TooLong(self.options.max_request_len);
                    self.reject(&err).await?
                }
            };
            if let Flow::Close = flow {
                break;
            }
        }
        Ok(())
    }

    /// Read the next request, or `None` once the client has closed.
    async fn next_request(&mut self) -> Result<Option<Message>, SessionError> {
        let idle = self.options.idle_timeout;
        let read = self.read_message();
        match idle {
            Some(d) => tokio::time::timeout(d, read)
                .await
                .map_err(|_| SessionError::IdleTimeout)?,
            None => read.await,
        }
    }

    async fn read_message(&mut self) -> Result<Option<Message>, SessionError> {
        match self.options.framing {
            Framing::Raw => {
                let mut buf = vec![0u8; self.options.read_buffer];
                let n = self.conn.read(&mut buf).await?;
                if n == 0 {
                    return Ok(None);
                }
                buf.truncate(n);
                Ok(Some(Message::Request(buf)))
            }
            Framing::Framed => {
                let max = self.options.max_request_len;
                let mut buf = Vec::new();
                let n = self.read_capped_line(&mut buf).await?;
                if n == 0 {
                    return Ok(None);
                }
                if buf.last() != Some(&b'\n') && buf.len() > max {
                    self.discard_line(buf).await?;
                    return Ok(Some(Message::TooLong));
                }
                Ok(Some(Message::Request(buf)))
            }
        }
    }

    /// Read up to and including `\n`, but never more than one byte past
    /// `max_request_len`.
    async fn read_capped_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let cap = self.options.max_request_len as u64 + 1;
        (&mut self.conn).take(cap).read_until(b'\n', buf).await
    }

    /// Drop the rest of an overlong line, reusing `scratch` so memory stays
    /// bounded by the cap.
    async fn discard_line(&mut self, mut scratch: Vec<u8>) -> io::Result<()> {
        loop {
            scratch.clear();
            let n = self.read_capped_line(&mut scratch).await?;
            if n == 0 || scratch.last() == Some(&b'\n') {
                return Ok(());
            }
        }
    }

    /// Answer a request that could not be parsed. The session goes on.
    async fn reject(&mut self, err: &RequestError) -> Result<Flow, SessionError> {
        warn!(error = %err, "malformed request");
        self.write_reply(&Reply::from(err)).await?;
        Ok(Flow::Continue)
    }

    async fn handle(&mut self, message: &[u8]) -> Result<Flow, SessionError> {
        let parsed = std::str::from_utf8(message)
            .map_err(|_| RequestError::NotUtf8)
            .and_then(Command::parse);

        let cmd = match parsed {
            Ok(cmd) => cmd,
            Err(err) => return self.reject(&err).await,
        };

        match dispatch(&mut self.store, &self.options.format, cmd) {
            Action::Reply(reply) => {
                self.write_reply(&reply).await?;
                Ok(Flow::Continue)
            }
            Action::Stream(track) => {
                let (file, len) = match open_track(&track.path).await {
                    Ok(opened) => opened,
                    Err(err) => {
                        warn!(path = %track.path.display(), error = %err, "cannot open track");
                        let reply = Reply::with_status(
                            Status::IoError,
                            format!("Unable to open {}", track.title),
                        );
                        self.write_reply(&reply).await?;
                        return Ok(Flow::Continue);
                    }
                };

                let framed = self.options.framing == Framing::Framed;
                stream::send_file(
                    self.conn.get_mut(),
                    file,
                    len,
                    &track,
                    framed,
                    self.options.write_timeout,
                )
                .await?;

                if framed {
                    Ok(Flow::Continue)
                } else {
                    // Raw audio has no terminator; EOF is the only delimiter.
                    debug!("closing raw session after playback");
                    Ok(Flow::Close)
                }
            }
        }
    }

    async fn write_reply(&mut self, reply: &Reply) -> Result<(), SessionError> {
        let deadline = self.options.write_timeout;
        let framed = self.options.framing == Framing::Framed;
        let w = self.conn.get_mut();

        with_deadline(deadline, async {
            if framed {
                FrameHeader::new(Kind::Text, reply.status, reply.body.len())?
                    .write_to(w)
                    .await?;
            }
            w.write_all(reply.body.as_bytes()).await?;
            w.flush().await?;
            Ok::<(), io::Error>(())
        })
        .await
    }
}
