//! Call session table
//!
//! Tracks every in-flight private call session, keyed by the pair that
//! defines it. Sessions are transient: nothing here survives a disconnect of
//! either participant, and there is no invite timeout: a session sits in a
//! non-terminal phase until an explicit end or a disconnect clears it.

use std::collections::HashMap;

use crate::protocol::{ConnectionId, UserId};

use super::session::{CallEvent, CallPhase};

/// Identity of one call session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallKey {
    /// The inviting operator's connection
    pub operator: ConnectionId,
    /// The invited user (stable across that user's reconnects)
    pub target: UserId,
}

/// Table of in-flight call sessions
#[derive(Debug, Default)]
pub struct CallTable {
    sessions: HashMap<CallKey, CallPhase>,
}

impl CallTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session in `Invited`
    ///
    /// A repeat invite for the same pair restarts the session.
    pub fn invite(&mut self, operator: ConnectionId, target: UserId) {
        let key = CallKey { operator, target };
        tracing::debug!(operator = %key.operator, target = %key.target, "Call invited");
        self.sessions.insert(key, CallPhase::Invited);
    }

    /// Apply an event to one session
    ///
    /// Returns `true` if the session existed and the transition was valid.
    /// Terminal sessions are dropped from the table.
    pub fn apply(&mut self, key: &CallKey, event: CallEvent) -> bool {
        let Some(phase) = self.sessions.get_mut(key) else {
            return false;
        };
        let Some(next) = phase.apply(event) else {
            tracing::debug!(
                operator = %key.operator,
                target = %key.target,
                phase = ?phase,
                event = ?event,
                "Ignoring invalid call transition"
            );
            return false;
        };

        *phase = next;
        if next.is_terminal() {
            self.sessions.remove(key);
        }
        true
    }

    /// Current phase of a session
    pub fn phase(&self, key: &CallKey) -> Option<CallPhase> {
        self.sessions.get(key).copied()
    }

    /// End every session involving a closed connection
    ///
    /// A connection participates as the operator side (keyed directly) or as
    /// the target side (keyed by its bound user). Returns the keys of the
    /// sessions that were live, so the hub can tell each counterpart.
    pub fn remove_involving(
        &mut self,
        connection_id: ConnectionId,
        bound_user: Option<&UserId>,
    ) -> Vec<CallKey> {
        let keys: Vec<CallKey> = self
            .sessions
            .keys()
            .filter(|key| key.operator == connection_id || Some(&key.target) == bound_user)
            .cloned()
            .collect();

        for key in &keys {
            self.sessions.remove(key);
            tracing::debug!(
                operator = %key.operator,
                target = %key.target,
                conn = %connection_id,
                "Call ended by disconnect"
            );
        }

        keys
    }

    /// Number of in-flight sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the table has no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
