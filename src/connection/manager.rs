//! Single-tenant TCP listener for operator connections

use super::notifier::Notifier;
use crate::command::CommandDispatcher;
use anyhow::Result;
use std::net::SocketAddr;
use tokio::io::AsyncReadExt;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use wardbot_shared::codec::LineDecoder;

/// Accepts one operator connection at a time and feeds its lines to the
/// dispatcher
///
/// The accept loop does not accept again until the current connection is
/// torn down; a second client simply waits in the OS backlog. Dropping the
/// connection never cancels a running patrol session.
pub struct ConnectionManager {
    listener: TcpListener,
    dispatcher: CommandDispatcher,
    notifier: Notifier,
}

impl ConnectionManager {
    /// Bind the command port
    pub async fn bind(
        addr: &str,
        dispatcher: CommandDispatcher,
        notifier: Notifier,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Command listener bound on {}", listener.local_addr()?);
        Ok(Self {
            listener,
            dispatcher,
            notifier,
        })
    }

    /// Address actually bound (relevant when binding port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients forever, one at a time
    pub async fn serve(self) -> Result<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            info!("Client connected: {}", addr);

            let (reader, writer) = stream.into_split();
            self.notifier.attach(writer).await;

            match self.read_loop(reader).await {
                Ok(()) => info!("Client {} disconnected", addr),
                Err(e) => warn!("Client {} dropped: {}", addr, e),
            }
            self.notifier.detach().await;
        }
    }

    /// Forward newline-delimited command lines until the client goes away
    ///
    /// Commands are handled serially: a line that runs an action blocks the
    /// next read, while notifications keep flowing through the notifier.
    async fn read_loop(&self, mut reader: OwnedReadHalf) -> Result<()> {
        let mut decoder = LineDecoder::new();
        let mut buf = vec![0u8; 1024];

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                return Ok(());
            }
            decoder.extend(&buf[..n]);

            while let Some(line) = decoder.decode_next()? {
                if line.trim().is_empty() {
                    continue;
                }
                debug!("Received line: {:?}", line);
                self.dispatcher.dispatch_line(&line).await;
            }
        }
    }
}
