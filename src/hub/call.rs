//! Private call handlers
//!
//! Invite and accept are brokered (the registry supplies routing and the
//! call-ready gate); everything after the handshake rides the generic relay.

use crate::call::{CallEvent, CallKey};
use crate::protocol::{ConnectionId, ServerMessage, UserId};

use super::{HubState, SignalHub};

impl SignalHub {
    /// `call.invite`: operator invites a call-ready user
    ///
    /// Dropped without a trace to the sender when the sender is not an
    /// operator, the target is offline, or the target is not call-ready. An
    /// operator whose invite was dropped simply never hears an accept, which
    /// is indistinguishable from the target ignoring the invite.
    pub(super) fn on_call_invite(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        target_user_id: UserId,
        operator_name: String,
    ) {
        if !state.registry.is_operator(connection_id) {
            tracing::debug!(conn = %connection_id, "Invite from non-operator ignored");
            return;
        }

        let Some(target_connection) = state.registry.resolve(&target_user_id) else {
            tracing::debug!(target = %target_user_id, "Invite dropped, target offline");
            return;
        };
        if !state.registry.status(&target_user_id).call_ready {
            tracing::debug!(target = %target_user_id, "Invite dropped, target not call-ready");
            return;
        }

        state.calls.invite(connection_id, target_user_id);
        self.send_to(
            state,
            target_connection,
            ServerMessage::CallInvited {
                operator_connection_id: connection_id,
                operator_name,
            },
        );
    }

    /// `call.accept`: invited user accepts, operator learns the target's
    /// connection id
    ///
    /// No-op unless the accepting connection is identity-bound and a matching
    /// session is sitting in `Invited`.
    pub(super) fn on_call_accept(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        operator_connection_id: ConnectionId,
    ) {
        let Some(user_id) = state.registry.user_of(connection_id).cloned() else {
            tracing::debug!(conn = %connection_id, "Accept from anonymous connection ignored");
            return;
        };

        let key = CallKey {
            operator: operator_connection_id,
            target: user_id.clone(),
        };
        if !state.calls.apply(&key, CallEvent::Accept) {
            return;
        }

        self.send_to(
            state,
            operator_connection_id,
            ServerMessage::CallAccepted {
                target_connection_id: connection_id,
                target_user_id: user_id,
            },
        );
    }

    /// `call.end`: tear-down notice for the peer, explicit or failure-driven
    ///
    /// The relay itself is unconditional; any tracked session between the two
    /// endpoints is closed as a side effect.
    pub(super) fn on_call_end(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        target_connection_id: ConnectionId,
    ) {
        // Sender as operator, target as invited user
        if let Some(target_user) = state.registry.user_of(target_connection_id).cloned() {
            let key = CallKey {
                operator: connection_id,
                target: target_user,
            };
            state.calls.apply(&key, CallEvent::End);
        }
        // Sender as invited user, target as operator
        if let Some(own_user) = state.registry.user_of(connection_id).cloned() {
            let key = CallKey {
                operator: target_connection_id,
                target: own_user,
            };
            state.calls.apply(&key, CallEvent::End);
        }

        self.send_to(state, target_connection_id, ServerMessage::CallEnded);
    }
}
