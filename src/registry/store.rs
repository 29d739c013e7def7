//! Connection registry implementation
//!
//! A bidirectional map between live connections and optional application
//! identities, plus the per-user call-ready flag. This is the leaf component
//! everything else keys off.
//!
//! The registry itself is plain synchronous state: the hub serializes all
//! mutations behind a single lock, so transitions here are atomic relative to
//! each other (a release clears the connection id and the ready flag in one
//! step, never observably half-done).

use std::collections::HashMap;

use crate::protocol::{ConnectionId, UserId};

use super::entry::{ConnectionEntry, PresenceEntry, PresenceStatus};

/// Registry of live connections and user presence
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// Per-connection state, keyed by connection id
    connections: HashMap<ConnectionId, ConnectionEntry>,

    /// Per-user presence, keyed by application user id
    presence: HashMap<UserId, PresenceEntry>,
}

impl PresenceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly opened connection (unidentified, non-operator)
    pub fn open(&mut self, connection_id: ConnectionId) {
        self.connections
            .insert(connection_id, ConnectionEntry::default());

        tracing::debug!(conn = %connection_id, "Connection opened");
    }

    /// Bind a connection to an application identity
    ///
    /// A prior binding to a different identity is released first. Binding a
    /// user already bound elsewhere displaces the old connection (last
    /// identify wins, no error). Identify with no user id clears the binding
    /// and leaves the connection anonymous; the operator flag only takes
    /// effect alongside a bound identity.
    ///
    /// Returns the user ids whose presence changed, for operator
    /// notification.
    pub fn identify(
        &mut self,
        connection_id: ConnectionId,
        user_id: Option<UserId>,
        is_operator: bool,
    ) -> Vec<UserId> {
        let mut changed = Vec::new();

        let previous = self
            .connections
            .get(&connection_id)
            .and_then(|c| c.user_id.clone());

        // Release the prior binding if this connection switches identity
        if let Some(ref prev) = previous {
            if user_id.as_ref() != Some(prev) {
                if let Some(entry) = self.presence.get_mut(prev) {
                    if entry.connection_id == Some(connection_id) {
                        entry.connection_id = None;
                        entry.call_ready = false;
                        changed.push(prev.clone());
                    }
                }
            }
        }

        let conn = self.connections.entry(connection_id).or_default();
        conn.user_id = user_id.clone();
        conn.is_operator = is_operator && conn.user_id.is_some();

        if let Some(uid) = user_id {
            let entry = self.presence.entry(uid.clone()).or_default();

            // Displacing another connection applies release semantics to the
            // old binding; re-identifying from the same connection keeps the
            // ready flag untouched.
            if entry.connection_id != Some(connection_id) {
                if let Some(displaced) = entry.connection_id {
                    tracing::info!(
                        user = %uid,
                        old_conn = %displaced,
                        new_conn = %connection_id,
                        "Identity displaced to new connection"
                    );
                }
                entry.connection_id = Some(connection_id);
                entry.call_ready = false;
            }
            changed.push(uid);
        }

        changed
    }

    /// Set the call-ready flag for the connection's own bound identity
    ///
    /// No-op for anonymous connections and for connections that no longer own
    /// their identity's binding. Returns the user id to notify about.
    pub fn mark_call_ready(&mut self, connection_id: ConnectionId) -> Option<UserId> {
        self.set_call_ready(connection_id, true)
    }

    /// Clear the call-ready flag for the connection's own bound identity
    pub fn clear_call_ready(&mut self, connection_id: ConnectionId) -> Option<UserId> {
        self.set_call_ready(connection_id, false)
    }

    fn set_call_ready(&mut self, connection_id: ConnectionId, ready: bool) -> Option<UserId> {
        let user_id = self.connections.get(&connection_id)?.user_id.clone()?;
        let entry = self.presence.get_mut(&user_id)?;

        if entry.connection_id != Some(connection_id) {
            return None;
        }

        entry.call_ready = ready;
        tracing::debug!(user = %user_id, ready = ready, "Call-ready flag updated");

        Some(user_id)
    }

    /// Look up the live connection for a user, for routing
    pub fn resolve(&self, user_id: &UserId) -> Option<ConnectionId> {
        self.presence.get(user_id)?.connection_id
    }

    /// Presence snapshot for a user, as reported to operators
    ///
    /// Unknown users report as disconnected and not ready.
    pub fn status(&self, user_id: &UserId) -> PresenceStatus {
        match self.presence.get(user_id) {
            Some(entry) => PresenceStatus {
                connected: entry.connection_id.is_some(),
                call_ready: entry.call_ready,
            },
            None => PresenceStatus {
                connected: false,
                call_ready: false,
            },
        }
    }

    /// Drop a closed connection
    ///
    /// Clears the bound identity's connection id and ready flag, but only if
    /// this connection still owns the binding: a connection displaced by a
    /// later identify must not clobber the identity's new state. Returns the
    /// released user id, for operator notification.
    pub fn release(&mut self, connection_id: ConnectionId) -> Option<UserId> {
        let entry = self.connections.remove(&connection_id)?;
        let user_id = entry.user_id?;

        let presence = self.presence.get_mut(&user_id)?;
        if presence.connection_id != Some(connection_id) {
            return None;
        }

        presence.connection_id = None;
        presence.call_ready = false;

        tracing::debug!(conn = %connection_id, user = %user_id, "Presence released");

        Some(user_id)
    }

    /// The identity bound to a connection, if any
    pub fn user_of(&self, connection_id: ConnectionId) -> Option<&UserId> {
        self.connections.get(&connection_id)?.user_id.as_ref()
    }

    /// Whether the connection identified as an operator
    pub fn is_operator(&self, connection_id: ConnectionId) -> bool {
        self.connections
            .get(&connection_id)
            .map(|c| c.is_operator)
            .unwrap_or(false)
    }

    /// All connections currently flagged as operators
    pub fn operator_connections(&self) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .filter(|(_, entry)| entry.is_operator)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of users with a live connection
    pub fn identified_count(&self) -> usize {
        self.presence
            .values()
            .filter(|e| e.connection_id.is_some())
            .count()
    }
}
