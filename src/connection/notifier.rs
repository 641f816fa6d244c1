//! Outbound notification path to the attached client

use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::Mutex;
use tracing::debug;
use wardbot_shared::codec::encode_speak;

/// Fire-and-forget `SPEAK:` sender
///
/// Holds the write half of the active connection, if any. Any task may call
/// `notify`; with no client attached the notification is dropped, matching
/// the robot's behavior when it patrols unattended.
#[derive(Clone, Default)]
pub struct Notifier {
    writer: Arc<Mutex<Option<OwnedWriteHalf>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the write half of a freshly accepted connection
    pub async fn attach(&self, writer: OwnedWriteHalf) {
        *self.writer.lock().await = Some(writer);
    }

    /// Drop the write half on disconnect
    pub async fn detach(&self) {
        *self.writer.lock().await = None;
    }

    /// Send one notification to the attached client, if any
    ///
    /// A write failure detaches the client; the read side will notice the
    /// disconnect on its own.
    pub async fn notify(&self, text: &str) {
        let mut guard = self.writer.lock().await;
        if let Some(writer) = guard.as_mut() {
            if let Err(e) = writer.write_all(encode_speak(text).as_bytes()).await {
                debug!("Notification write failed, detaching client: {}", e);
                *guard = None;
            }
        } else {
            debug!("No client attached, dropping notification: {}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::{TcpListener, TcpStream};

    #[tokio::test]
    async fn test_notify_without_client_is_dropped() {
        let notifier = Notifier::new();
        // Must not panic or block
        notifier.notify("Patrol started.").await;
    }

    #[tokio::test]
    async fn test_notify_writes_speak_line() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        let (_read, write) = server.into_split();

        let notifier = Notifier::new();
        notifier.attach(write).await;
        notifier.notify("Step 1").await;

        let mut buf = vec![0u8; 64];
        let n = client.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"SPEAK:Step 1\n");
    }

    #[tokio::test]
    async fn test_detach_stops_delivery() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut client = TcpStream::connect(addr).await.unwrap();
        let (server, _) = listener.accept().await.unwrap();
        let (_read, write) = server.into_split();

        let notifier = Notifier::new();
        notifier.attach(write).await;
        notifier.detach().await;
        notifier.notify("Turning.").await;

        // Detaching drops the write half, so the client sees EOF
        let n = client.read(&mut [0u8; 16]).await.unwrap();
        assert_eq!(n, 0);
    }
}
