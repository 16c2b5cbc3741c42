//! TCP acceptor: one spawned session task per connection.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, ToSocketAddrs};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::library::Catalog;
use crate::session::{Session, SessionOptions};

/// Pause after a failed accept so resource exhaustion does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct Server {
    listener: TcpListener,
    catalog: Arc<Catalog>,
    options: Arc<SessionOptions>,
}

impl Server {
    /// Bind the listening socket. The catalog must already be complete.
    pub async fn bind<A>(addr: A, catalog: Arc<Catalog>, options: SessionOptions) -> io::Result<Self>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            catalog,
            options: Arc::new(options),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Sessions already running are left to finish on their own. Returns
    /// the number of connections accepted.
    pub async fn serve_until<F>(self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut accepted = 0usize;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                res = self.listener.accept() => match res {
                    Ok((stream, peer)) => {
                        accepted += 1;
                        if let Err(err) = stream.set_nodelay(true) {
                            debug!(%peer, error = %err, "set_nodelay failed");
                        }
                        let session = Session::new(stream, Arc::clone(&self.catalog), Arc::clone(&self.options));
                        tokio::spawn(
                            async move {
                                // Errors are logged by the session itself.
                                let _ = session.run().await;
                            }
                            .instrument(info_span!("session", %peer)),
                        );
                    }
                    Err(err) => {
                        warn!(error = %err, "accept failed");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }

        info!(accepted, "acceptor stopped");
        accepted
    }

    /// Accept connections forever.
    pub async fn serve(self) -> usize {
        self.serve_until(std::future::pending()).await
    }
}

#[cfg(test)]
mod tests;
