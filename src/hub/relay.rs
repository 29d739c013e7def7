//! Signaling relay handlers
//!
//! Stateless pass-through of session descriptions and connectivity
//! candidates to a caller-supplied target connection. Payloads are never
//! inspected; the relay only annotates the sender's connection id. The call
//! and broadcast coordinators observe which pairs descriptions travel
//! between to advance their bookkeeping, but observation never gates
//! delivery.

use serde_json::Value;

use crate::call::{CallEvent, CallKey};
use crate::protocol::{ConnectionId, ServerMessage};

use super::{HubState, SignalHub};

impl SignalHub {
    /// `sdp.offer`: relay a session description offer
    pub(super) fn on_sdp_offer(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        target_connection_id: ConnectionId,
        description: Value,
    ) {
        // Operator -> invited user advances a tracked call session
        if let Some(target_user) = state.registry.user_of(target_connection_id).cloned() {
            let key = CallKey {
                operator: connection_id,
                target: target_user,
            };
            state.calls.apply(&key, CallEvent::Offer);
        }
        // Publisher -> viewer advances a viewer entry
        state
            .broadcast
            .observe_offer(connection_id, target_connection_id);

        self.send_to(
            state,
            target_connection_id,
            ServerMessage::SdpOfferReceived {
                sender_connection_id: connection_id,
                description,
            },
        );
    }

    /// `sdp.answer`: relay a session description answer
    pub(super) fn on_sdp_answer(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        target_connection_id: ConnectionId,
        description: Value,
    ) {
        // Invited user -> operator advances a tracked call session
        if let Some(own_user) = state.registry.user_of(connection_id).cloned() {
            let key = CallKey {
                operator: target_connection_id,
                target: own_user,
            };
            state.calls.apply(&key, CallEvent::Answer);
        }
        // Viewer -> publisher advances a viewer entry
        state
            .broadcast
            .observe_answer(connection_id, target_connection_id);

        self.send_to(
            state,
            target_connection_id,
            ServerMessage::SdpAnswerReceived {
                sender_connection_id: connection_id,
                description,
            },
        );
    }

    /// `ice.candidate`: relay a connectivity candidate
    pub(super) fn on_ice_candidate(
        &self,
        state: &HubState,
        connection_id: ConnectionId,
        target_connection_id: ConnectionId,
        candidate: Value,
    ) {
        self.send_to(
            state,
            target_connection_id,
            ServerMessage::IceCandidateReceived {
                sender_connection_id: connection_id,
                candidate,
            },
        );
    }
}
