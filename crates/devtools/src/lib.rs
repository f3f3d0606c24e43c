//! DevTools protocol client.
//!
//! Talks to a browser's remote-debugging interface: targets are discovered
//! over the HTTP endpoint, then each target is driven over its own
//! WebSocket control channel with request/response correlation by id and
//! raw event pass-through.
//!
//! # Architecture
//!
//! 1. **One reader task per session**: inbound frames are demultiplexed to
//!    whichever caller issued the matching command
//! 2. **Domain-agnostic core**: the session knows methods only as
//!    `"Domain.command"` strings; typed wrappers live above it
//! 3. **Each in-flight command is independent**: per-command completion
//!    slots and deadlines, so no caller ever waits on another's traffic

pub mod client;
pub mod error;
pub mod http;
pub mod target;
pub mod ws;

pub use client::DevTools;
pub use error::{Error, Result};
pub use http::{HttpClient, TargetDescriptor, VersionInfo};
pub use target::{Browser, Tab, TargetInfo};
pub use ws::{Event, Session};
