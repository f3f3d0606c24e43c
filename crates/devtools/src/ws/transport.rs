//! WebSocket transport.
//!
//! Thin wrapper over tokio-tungstenite: one call to open a connection,
//! split into a text-frame sink and a text-frame stream so sending and
//! receiving can proceed from different tasks. Everything above this
//! module deals in whole text frames only.

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::{Error, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Write half: sends one text frame at a time.
pub(crate) struct FrameSink {
    inner: SplitSink<WsStream, Message>,
}

/// Read half: yields inbound text frames until the connection finishes.
pub(crate) struct FrameStream {
    inner: SplitStream<WsStream>,
}

/// Opens a WebSocket connection to `url` and splits it into halves.
/// Blocks until the handshake completes or fails.
pub(crate) async fn connect(url: &str) -> Result<(FrameSink, FrameStream)> {
    let (stream, _) = connect_async(url).await.map_err(Error::Connect)?;
    let (sink, stream) = stream.split();
    Ok((FrameSink { inner: sink }, FrameStream { inner: stream }))
}

impl FrameSink {
    pub async fn send(&mut self, frame: String) -> Result<()> {
        self.inner.send(Message::Text(frame)).await?;
        Ok(())
    }

    /// Starts the close handshake. The peer's acknowledgement arrives on
    /// the read half.
    pub async fn close(&mut self) -> Result<()> {
        self.inner.close().await?;
        Ok(())
    }
}

impl FrameStream {
    /// Next inbound text frame. Control frames are skipped; `None` means
    /// the connection is finished.
    pub async fn next_text(&mut self) -> Option<Result<String>> {
        while let Some(message) = self.inner.next().await {
            match message {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Close(_)) => return None,
                Ok(_) => continue,
                Err(e) => return Some(Err(Error::WebSocket(e))),
            }
        }
        None
    }
}
