//! Session - the control-channel multiplexer.
//!
//! Design decisions:
//! 1. One WebSocket and one reader task per session, for the session's lifetime
//! 2. Request/response matching via id; each in-flight command owns a oneshot slot
//! 3. The pending table is registered *before* the frame goes out, so a response
//!    can never race past its own bookkeeping
//! 4. Fail fast - every failure goes back to the caller that dispatched
//!    the command, typed; nothing is retried or queued internally

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::{broadcast, oneshot, RwLock};

use crate::error::{Error, Result};
use crate::ws::protocol::{CommandId, Event, Message, Request, Response};
use crate::ws::transport::{self, FrameSink, FrameStream};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// One control channel to one target.
///
/// Any number of tasks may dispatch commands concurrently; each caller
/// suspends only on its own pending slot, and responses are routed purely
/// by id, so commands may complete out of send order.
pub struct Session {
    /// Monotonic command id counter, scoped to this session.
    next_id: AtomicU64,

    /// Response deadline applied by [`Session::call`].
    default_timeout: Duration,

    /// In-flight commands awaiting their response.
    pending: DashMap<CommandId, oneshot::Sender<Response>>,

    /// Raw pass-through of uncorrelated event frames. Lossy: events sent
    /// while no receiver exists are dropped.
    events: broadcast::Sender<Event>,

    /// WebSocket write half (wrapped for concurrent sending).
    sink: RwLock<FrameSink>,

    /// Set on explicit close or when the reader loop dies.
    closed: AtomicBool,
}

impl Session {
    /// Connects to a control-channel endpoint. Blocks until the WebSocket
    /// handshake completes, then spawns the frame receiver task.
    ///
    /// `timeout` is the per-command response deadline used by
    /// [`Session::call`].
    pub async fn connect(url: &str, timeout: Duration) -> Result<Arc<Self>> {
        tracing::debug!("connecting to {}", url);
        let (sink, stream) = transport::connect(url).await?;

        let session = Arc::new(Self {
            next_id: AtomicU64::new(1),
            default_timeout: timeout,
            pending: DashMap::new(),
            events: broadcast::channel(EVENT_CHANNEL_CAPACITY).0,
            sink: RwLock::new(sink),
            closed: AtomicBool::new(false),
        });

        tokio::spawn(Self::read_loop(Arc::clone(&session), stream));

        tracing::debug!("connected to {}", url);
        Ok(session)
    }

    /// Sends a command and waits for its response, up to the session's
    /// configured timeout.
    pub async fn call(&self, method: impl Into<String>, params: Option<Value>) -> Result<Value> {
        self.call_with_timeout(method, params, self.default_timeout)
            .await
    }

    /// Sends a command with an explicit response deadline for this call
    /// only. Expiry cancels just this command; the session and all other
    /// in-flight commands are unaffected.
    pub async fn call_with_timeout(
        &self,
        method: impl Into<String>,
        params: Option<Value>,
        timeout: Duration,
    ) -> Result<Value> {
        let method = method.into();
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::SessionClosed);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let frame = serde_json::to_string(&Request {
            id,
            method: method.clone(),
            params,
        })?;

        // Register before sending so a response cannot arrive ahead of its
        // pending entry.
        let (tx, rx) = oneshot::channel();
        self.pending.insert(id, tx);

        tracing::debug!("sending '{}' command (id {})", method, id);
        {
            let mut sink = self.sink.write().await;
            if let Err(e) = sink.send(frame).await {
                self.pending.remove(&id);
                return Err(e);
            }
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => {
                tracing::debug!("received response for command with id {}", id);
                match response.error {
                    Some(error) => Err(Error::Protocol {
                        code: error.code,
                        message: error.message,
                        data: error.data,
                    }),
                    None => Ok(response.result.unwrap_or(Value::Null)),
                }
            }
            // Sender dropped: the reader loop died and flushed the table.
            Ok(Err(_)) => Err(Error::ConnectionClosed),
            Err(_) => {
                // Removal is idempotent against a fulfillment racing the
                // deadline; a response landing after this is dropped by the
                // reader as unknown.
                self.pending.remove(&id);
                Err(Error::Timeout { method, id })
            }
        }
    }

    /// Invokes `Domain.command`. This is the seam generated typed wrappers
    /// build on; no domain or command name is known to the session itself.
    pub async fn invoke(
        &self,
        domain: &str,
        command: &str,
        params: Option<Value>,
    ) -> Result<Value> {
        self.call(format!("{domain}.{command}"), params).await
    }

    /// Subscribes to the raw event stream.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Whether the session has been closed, explicitly or by transport
    /// failure.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Closes the connection. Safe to call with commands in flight: the
    /// reader loop fails every pending command as it shuts down, and any
    /// later dispatch fails immediately.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        tracing::debug!("closing websocket session");
        self.sink.write().await.close().await
    }

    /// Frame receiver: runs until the connection finishes, then fails all
    /// outstanding commands so no caller is left waiting.
    async fn read_loop(session: Arc<Session>, mut stream: FrameStream) {
        while let Some(frame) = stream.next_text().await {
            match frame {
                Ok(text) => session.handle_frame(&text),
                Err(e) => {
                    tracing::error!("websocket read failed: {}", e);
                    break;
                }
            }
        }
        session.closed.store(true, Ordering::Release);
        // Dropping the senders completes every waiting caller with a
        // connection-closed error, exactly once each.
        session.pending.clear();
        tracing::debug!("frame receiver finished, session closed");
    }

    fn handle_frame(&self, text: &str) {
        tracing::trace!("received frame: {}", text);
        let message: Message = match serde_json::from_str(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("dropping malformed frame: {}", e);
                return;
            }
        };

        match message {
            Message::Response(response) => match self.pending.remove(&response.id) {
                Some((_, tx)) => {
                    // Receiver may have timed out between lookup and here.
                    let _ = tx.send(response);
                }
                None => {
                    tracing::warn!("dropping response for unknown command id {}", response.id);
                }
            },
            Message::Event(event) => {
                // No subscribers is fine; events are fire-and-forget.
                let _ = self.events.send(event);
            }
        }
    }
}
