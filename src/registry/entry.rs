//! Registry entry types
//!
//! Per-connection and per-user state stored in the registry.

use crate::protocol::{ConnectionId, UserId};

/// State attached to one live connection
///
/// Exists from transport-open to transport-close. The identity binding is
/// optional: anonymous connections can still relay and view broadcasts.
#[derive(Debug, Default)]
pub struct ConnectionEntry {
    /// Bound application identity, if the connection has identified
    pub user_id: Option<UserId>,

    /// Whether the connection identified with the operator flag
    pub is_operator: bool,
}

/// Presence state for one application user
///
/// Created on first identify for the user id and kept after disconnect with
/// its connection id cleared, so the ready flag can never describe a phantom
/// "ready but disconnected" user.
#[derive(Debug, Default)]
pub struct PresenceEntry {
    /// Currently bound connection, if any
    pub connection_id: Option<ConnectionId>,

    /// Whether the user is on the call-waiting surface
    pub call_ready: bool,
}

/// Point-in-time presence snapshot, as reported to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceStatus {
    /// Whether the user has a live connection
    pub connected: bool,
    /// Whether the user may receive call invites
    pub call_ready: bool,
}
