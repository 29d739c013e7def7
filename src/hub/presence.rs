//! Identity and presence handlers

use crate::protocol::{ConnectionId, UserId};

use super::{HubState, SignalHub};

impl SignalHub {
    /// `identify`: bind (or clear) a connection's application identity
    pub(super) fn on_identify(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        user_id: Option<UserId>,
        is_operator: bool,
    ) {
        tracing::info!(
            conn = %connection_id,
            user = ?user_id,
            operator = is_operator,
            "Identify"
        );

        let changed = state.registry.identify(connection_id, user_id, is_operator);
        for user_id in changed {
            self.notify_operators(state, &user_id);
        }
    }

    /// `operator.checkStatus`: force one presence re-emit for a user
    pub(super) fn on_check_status(
        &self,
        state: &HubState,
        connection_id: ConnectionId,
        target_user_id: &UserId,
    ) {
        if !state.registry.is_operator(connection_id) {
            tracing::debug!(conn = %connection_id, "checkStatus from non-operator ignored");
            return;
        }

        self.notify_operators(state, target_user_id);
    }

    /// `call.ready` / `call.unready`: toggle the call-waiting flag
    pub(super) fn on_call_ready(
        &self,
        state: &mut HubState,
        connection_id: ConnectionId,
        ready: bool,
    ) {
        let changed = if ready {
            state.registry.mark_call_ready(connection_id)
        } else {
            state.registry.clear_call_ready(connection_id)
        };

        if let Some(user_id) = changed {
            self.notify_operators(state, &user_id);
        }
    }
}
