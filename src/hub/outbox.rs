//! Per-connection outbound mailbox
//!
//! A handle to a connection's outbound queue. Sending is best-effort and
//! at-most-once: if the connection's pump has already shut down, the message
//! is dropped in silence. Endpoints learn about failure from their own
//! connectivity observation, not from relay acknowledgments.

use tokio::sync::mpsc;

use crate::protocol::{ConnectionId, ServerMessage};

/// Handle for pushing messages to one connection's write pump
#[derive(Debug, Clone)]
pub struct Outbox {
    connection_id: ConnectionId,
    tx: mpsc::UnboundedSender<ServerMessage>,
}

impl Outbox {
    /// Create an outbox and the receiver its connection pump drains
    pub fn channel(connection_id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { connection_id, tx }, rx)
    }

    /// The connection this outbox belongs to
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Queue a message, returning whether the pump was still alive
    pub fn send(&self, message: ServerMessage) -> bool {
        match self.tx.send(message) {
            Ok(()) => true,
            Err(_) => {
                tracing::trace!(conn = %self.connection_id, "Dropped message for closed connection");
                false
            }
        }
    }
}
