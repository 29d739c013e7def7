//! Broadcast fanout handlers

use crate::protocol::{ConnectionId, ServerMessage};

use super::{HubState, SignalHub};

impl SignalHub {
    /// `viewer.announce`: the connection is on the viewing surface
    ///
    /// During an active session the late joiner gets the session header and
    /// the publisher is asked to open negotiation with exactly this viewer.
    /// With no session the viewer just waits.
    pub(super) fn on_viewer_announce(&self, state: &mut HubState, connection_id: ConnectionId) {
        let outcome = state.broadcast.announce(connection_id);

        if let Some((title, subtitle)) = outcome.info {
            self.send_to(
                state,
                connection_id,
                ServerMessage::BroadcastInfo { title, subtitle },
            );
        }
        if let Some(publisher) = outcome.request_to {
            self.send_to(
                state,
                publisher,
                ServerMessage::ViewerRequest {
                    viewer_connection_id: connection_id,
                },
            );
        }
    }

    /// `viewer.leave`: the connection left the viewing surface
    pub(super) fn on_viewer_leave(&self, state: &mut HubState, connection_id: ConnectionId) {
        state.broadcast.leave(connection_id);
    }

    /// `broadcast.start`: operator opens the global session (last start wins)
    ///
    /// Every connection already on the viewing surface gets the session
    /// header, and the publisher gets one `viewerRequest` per waiting viewer.
    pub(super) fn on_broadcast_start(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        title: String,
        subtitle: String,
        access_flag: bool,
    ) {
        if !state.registry.is_operator(connection_id) {
            tracing::debug!(conn = %connection_id, "Broadcast start from non-operator ignored");
            return;
        }

        let pending = state
            .broadcast
            .start(connection_id, title.clone(), subtitle.clone(), access_flag);

        for viewer in state.broadcast.surface_connections() {
            if viewer != connection_id {
                self.send_to(
                    state,
                    viewer,
                    ServerMessage::BroadcastInfo {
                        title: title.clone(),
                        subtitle: subtitle.clone(),
                    },
                );
            }
        }
        for viewer in pending {
            self.send_to(
                state,
                connection_id,
                ServerMessage::ViewerRequest {
                    viewer_connection_id: viewer,
                },
            );
        }
    }

    /// `broadcast.end`: publisher closes the session
    ///
    /// Exactly one `broadcast.ended` per tracked viewer, then the viewer set
    /// is empty. Ignored unless the sender owns the active session.
    pub(super) fn on_broadcast_end(&self, state: &mut HubState, connection_id: ConnectionId) {
        let Some(viewers) = state.broadcast.end(connection_id) else {
            tracing::debug!(conn = %connection_id, "Broadcast end from non-publisher ignored");
            return;
        };

        for viewer in viewers {
            self.send_to(state, viewer, ServerMessage::BroadcastEnded);
        }
    }
}
