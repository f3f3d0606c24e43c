//! Control-channel implementation.
//!
//! One WebSocket per target, multiplexing typed commands and raw events.
//! `protocol` holds the wire envelopes, `transport` the framing, and
//! `session` the correlation machinery.

pub mod protocol;
pub mod session;
pub(crate) mod transport;

pub use protocol::{CommandId, Event, ProtocolError, Request, Response};
pub use session::Session;
