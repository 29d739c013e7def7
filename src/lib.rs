//! # signaling-rs
//!
//! Presence tracking and call/broadcast signaling relay over WebSocket.
//!
//! The crate tracks which application users are currently reachable over a
//! persistent connection, brokers one-to-one private call invitations
//! between an operator and a designated user, fans a one-to-many broadcast
//! session out from a single publisher to its viewers, and relays opaque
//! session-negotiation payloads between peer endpoints. It never touches
//! media: endpoints establish their own direct path from the small control
//! messages relayed here.
//!
//! ## Quick start
//!
//! ```no_run
//! use signaling_rs::{ServerConfig, SignalingServer};
//!
//! #[tokio::main]
//! async fn main() -> signaling_rs::Result<()> {
//!     let config = ServerConfig::default();
//!     let server = SignalingServer::new(config);
//!     server.run().await
//! }
//! ```
//!
//! ## Design
//!
//! All state is in-memory and owned by a single [`hub::SignalHub`], which
//! serializes every mutation; nothing survives a process restart and every
//! connection re-identifies from zero. Delivery is best-effort and
//! at-most-once: a message for a connection that is gone is dropped in
//! silence, and endpoints detect failure through their own connectivity
//! observation rather than relay acknowledgments.

pub mod broadcast;
pub mod call;
pub mod error;
pub mod hub;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod stats;

pub use error::{Error, Result};
pub use hub::SignalHub;
pub use protocol::{ClientMessage, ConnectionId, ServerMessage, UserId};
pub use server::{ServerConfig, SignalingServer};
