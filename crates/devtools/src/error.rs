//! Error taxonomy for the whole client.
//!
//! One enum, no wrapper layers. Transport and decode failures convert via
//! `#[from]`; protocol-level conditions carry their wire payload verbatim.

use serde_json::Value;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::ws::protocol::CommandId;

#[derive(Error, Debug)]
pub enum Error {
    /// The WebSocket connection could not be established.
    #[error("failed to establish websocket connection: {0}")]
    Connect(#[source] tungstenite::Error),

    /// A send or receive on an established connection failed.
    #[error("websocket transport error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// The HTTP discovery endpoint could not be reached or returned a
    /// non-success status.
    #[error("discovery request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reply from the remote side, surfaced unchanged.
    #[error("protocol error {code}: {message}")]
    Protocol {
        code: i32,
        message: String,
        data: Option<Value>,
    },

    /// No response arrived within the configured window. The command may
    /// still have executed remotely; the outcome is unknown, not failed.
    #[error("timed out waiting for response to {method} (id {id})")]
    Timeout { method: String, id: CommandId },

    /// Dispatch was attempted after the session closed.
    #[error("session is closed")]
    SessionClosed,

    /// The connection went away while a response was still outstanding.
    #[error("connection closed before a response arrived")]
    ConnectionClosed,
}

/// Result type for all client operations.
pub type Result<T> = std::result::Result<T, Error>;
