//! WebSocket server surface
//!
//! The listener accepts sockets and spawns one pump task per connection; all
//! signaling semantics live in the hub. The server carries no timeouts or
//! heartbeats of its own: a connection exists until the transport reports it
//! closed.

pub mod config;
pub mod connection;
pub mod listener;

pub use config::ServerConfig;
pub use connection::Connection;
pub use listener::SignalingServer;
