//! Signaling hub
//!
//! The hub is the single serialized owner of all relay state. Every inbound
//! event (identify, invite, relayed description, disconnect) is a fast,
//! non-blocking transition on state guarded by one lock, plus zero or more
//! sends into per-connection outboxes. No handler blocks on another
//! connection's I/O; a send is a synchronous hand-off into the target's
//! outbound queue.
//!
//! # Architecture
//!
//! ```text
//!   connection pump ──ClientMessage──► SignalHub::handle
//!                                          │  Mutex<HubState>
//!                        ┌─────────────────┼──────────────────┐
//!                        ▼                 ▼                  ▼
//!                 PresenceRegistry     CallTable        BroadcastState
//!                        │                 │                  │
//!                        └────────► Outbox::send ◄────────────┘
//!                                  (best-effort, silent drop)
//! ```
//!
//! Failure is never surfaced across the wire: routing misses are dropped,
//! policy rejections are no-ops, and the only terminal notifications are
//! `call.ended` and `broadcast.ended`.

pub mod outbox;

mod broadcast;
mod call;
mod presence;
mod relay;

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use tokio::sync::Mutex;

use crate::broadcast::BroadcastState;
use crate::call::CallTable;
use crate::protocol::{ClientMessage, ConnectionId, ServerMessage, UserId};
use crate::registry::PresenceRegistry;
use crate::stats::{HubCounters, HubStats};

pub use outbox::Outbox;

/// All mutable relay state, guarded by one lock
///
/// Transitions must be atomic relative to each other (a release clears
/// presence, call sessions, and broadcast entries in one critical section),
/// so the state is a single unit rather than per-component locks.
pub(crate) struct HubState {
    pub(crate) registry: PresenceRegistry,
    pub(crate) calls: CallTable,
    pub(crate) broadcast: BroadcastState,
    pub(crate) outboxes: HashMap<ConnectionId, Outbox>,
}

/// The signaling hub: presence registry, call and broadcast coordinators,
/// and the message relay, behind one serialized boundary
pub struct SignalHub {
    state: Mutex<HubState>,
    counters: HubCounters,
}

impl SignalHub {
    /// Create a hub with no connections
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HubState {
                registry: PresenceRegistry::new(),
                calls: CallTable::new(),
                broadcast: BroadcastState::new(),
                outboxes: HashMap::new(),
            }),
            counters: HubCounters::new(),
        }
    }

    /// Attach a newly accepted connection
    ///
    /// Registers the connection and greets it with its own id.
    pub async fn attach(&self, outbox: Outbox) {
        let connection_id = outbox.connection_id();
        let mut state = self.state.lock().await;

        state.registry.open(connection_id);
        outbox.send(ServerMessage::Hello { connection_id });
        state.outboxes.insert(connection_id, outbox);

        self.counters.record_connection();
    }

    /// Detach a closed connection
    ///
    /// Runs the full release sequence atomically: broadcast teardown (ending
    /// the session if this was the publisher), call teardown (a `call.ended`
    /// for every surviving counterpart), then presence release with operator
    /// notification.
    pub async fn detach(&self, connection_id: ConnectionId) {
        let mut state = self.state.lock().await;
        state.outboxes.remove(&connection_id);

        if let Some(viewers) = state.broadcast.release(connection_id) {
            for viewer in viewers {
                self.send_to(&state, viewer, ServerMessage::BroadcastEnded);
            }
        }

        // A displaced connection no longer owns its identity; only the
        // current owner's close counts as the target side of a call
        let bound_user = state
            .registry
            .user_of(connection_id)
            .filter(|user| state.registry.resolve(user) == Some(connection_id))
            .cloned();
        let ended_calls = state
            .calls
            .remove_involving(connection_id, bound_user.as_ref());
        for key in ended_calls {
            let counterpart = if key.operator == connection_id {
                state.registry.resolve(&key.target)
            } else {
                Some(key.operator)
            };
            if let Some(counterpart) = counterpart {
                self.send_to(&state, counterpart, ServerMessage::CallEnded);
            }
        }

        if let Some(user_id) = state.registry.release(connection_id) {
            self.notify_operators(&state, &user_id);
        }

        tracing::debug!(conn = %connection_id, "Connection detached");
    }

    /// Process one inbound message from a connection
    pub async fn handle(&self, connection_id: ConnectionId, message: ClientMessage) {
        let mut state = self.state.lock().await;

        match message {
            ClientMessage::Identify {
                user_id,
                is_operator,
            } => self.on_identify(&mut state, connection_id, user_id, is_operator),
            ClientMessage::CheckStatus { target_user_id } => {
                self.on_check_status(&state, connection_id, &target_user_id)
            }
            ClientMessage::CallReady => self.on_call_ready(&mut state, connection_id, true),
            ClientMessage::CallUnready => self.on_call_ready(&mut state, connection_id, false),
            ClientMessage::CallInvite {
                target_user_id,
                operator_name,
            } => self.on_call_invite(&mut state, connection_id, target_user_id, operator_name),
            ClientMessage::CallAccept {
                operator_connection_id,
            } => self.on_call_accept(&mut state, connection_id, operator_connection_id),
            ClientMessage::SdpOffer {
                target_connection_id,
                description,
            } => self.on_sdp_offer(&mut state, connection_id, target_connection_id, description),
            ClientMessage::SdpAnswer {
                target_connection_id,
                description,
            } => self.on_sdp_answer(&mut state, connection_id, target_connection_id, description),
            ClientMessage::IceCandidate {
                target_connection_id,
                candidate,
            } => self.on_ice_candidate(&state, connection_id, target_connection_id, candidate),
            ClientMessage::CallEnd {
                target_connection_id,
            } => self.on_call_end(&mut state, connection_id, target_connection_id),
            ClientMessage::ViewerAnnounce => self.on_viewer_announce(&mut state, connection_id),
            ClientMessage::ViewerLeave => self.on_viewer_leave(&mut state, connection_id),
            ClientMessage::BroadcastStart {
                title,
                subtitle,
                access_flag,
            } => self.on_broadcast_start(&mut state, connection_id, title, subtitle, access_flag),
            ClientMessage::BroadcastEnd => self.on_broadcast_end(&mut state, connection_id),
        }
    }

    /// Point-in-time snapshot of hub state and lifetime counters
    pub async fn stats(&self) -> HubStats {
        let state = self.state.lock().await;

        HubStats {
            active_connections: state.outboxes.len(),
            identified_users: state.registry.identified_count(),
            operator_connections: state.registry.operator_connections().len(),
            broadcast_active: state.broadcast.session().is_some(),
            viewer_count: state.broadcast.viewer_count(),
            call_sessions: state.calls.len(),
            connections_total: self.counters.connections_total.load(Ordering::Relaxed),
            messages_relayed: self.counters.messages_relayed.load(Ordering::Relaxed),
            messages_dropped: self.counters.messages_dropped.load(Ordering::Relaxed),
        }
    }

    /// Best-effort delivery to one connection
    ///
    /// A missing or closed target drops the message without surfacing
    /// anything to the sender.
    pub(crate) fn send_to(
        &self,
        state: &HubState,
        target: ConnectionId,
        message: ServerMessage,
    ) -> bool {
        let delivered = state
            .outboxes
            .get(&target)
            .map(|outbox| outbox.send(message))
            .unwrap_or(false);

        if delivered {
            self.counters.record_relayed();
        } else {
            self.counters.record_dropped();
            tracing::debug!(target = %target, "Routing miss, message dropped");
        }

        delivered
    }

    /// Fan a presence update out to every operator connection
    ///
    /// One fan-out per registry mutation, no batching or deduplication.
    pub(crate) fn notify_operators(&self, state: &HubState, user_id: &UserId) {
        let status = state.registry.status(user_id);

        for operator in state.registry.operator_connections() {
            self.send_to(
                state,
                operator,
                ServerMessage::PresenceUpdate {
                    user_id: user_id.clone(),
                    connected: status.connected,
                    call_ready: status.call_ready,
                },
            );
        }
    }
}

impl Default for SignalHub {
    fn default() -> Self {
        Self::new()
    }
}
