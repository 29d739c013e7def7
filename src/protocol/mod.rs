//! Wire protocol for the signaling relay
//!
//! The protocol is a flat set of JSON messages exchanged over a persistent
//! WebSocket connection. Every frame is one internally tagged object whose
//! `type` field names the message. Client-to-relay and relay-to-client
//! messages are separate enums; the relay never echoes a client message
//! verbatim, it re-emits a counterpart annotated with the sender's
//! connection id so the receiver knows whom to address in its reply.
//!
//! Negotiation payloads (session descriptions, connectivity candidates) are
//! carried as raw `serde_json::Value`s: the relay never inspects or mutates
//! them.

pub mod ids;
pub mod message;

pub use ids::{ConnectionId, UserId};
pub use message::{ClientMessage, ServerMessage};
