//! Private call session state machine
//!
//! One session exists per (operator connection, target user) pair, created
//! when an invite passes the call-ready gate. Transitions are explicit;
//! anything not in the table is a no-op, so out-of-order messages can never
//! corrupt a session.

/// Phase of a private call session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPhase {
    /// Invite delivered to the target, waiting for accept
    Invited,
    /// Target accepted, operator has the target's connection id
    Accepted,
    /// Operator's session description offer is in flight
    Negotiating,
    /// Answer relayed back, endpoints own the media path
    Active,
    /// Torn down by an explicit end or a disconnect
    Ended,
    /// Torn down after a connectivity failure report
    Failed,
}

/// Events that drive a call session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallEvent {
    /// Target accepted the invite
    Accept,
    /// Operator relayed a session description offer
    Offer,
    /// Target relayed a session description answer
    Answer,
    /// Either side sent an explicit end
    End,
    /// Either side's connection closed
    Disconnect,
    /// Endpoint connectivity monitoring reported failure
    ConnectivityFailure,
}

impl CallPhase {
    /// Apply an event, returning the next phase
    ///
    /// Returns `None` for transitions not in the table (including any event
    /// on a terminal phase).
    pub fn apply(self, event: CallEvent) -> Option<CallPhase> {
        use CallEvent::*;
        use CallPhase::*;

        match (self, event) {
            (Invited, Accept) => Some(Accepted),
            (Accepted, Offer) => Some(Negotiating),
            (Negotiating, Answer) => Some(Active),
            (Invited | Accepted | Negotiating | Active, End) => Some(Ended),
            (Invited | Accepted | Negotiating | Active, Disconnect) => Some(Ended),
            (Negotiating | Active, ConnectivityFailure) => Some(Failed),
            _ => None,
        }
    }

    /// Whether the session is over
    pub fn is_terminal(self) -> bool {
        matches!(self, CallPhase::Ended | CallPhase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let phase = CallPhase::Invited;
        let phase = phase.apply(CallEvent::Accept).unwrap();
        assert_eq!(phase, CallPhase::Accepted);

        let phase = phase.apply(CallEvent::Offer).unwrap();
        assert_eq!(phase, CallPhase::Negotiating);

        let phase = phase.apply(CallEvent::Answer).unwrap();
        assert_eq!(phase, CallPhase::Active);

        let phase = phase.apply(CallEvent::End).unwrap();
        assert_eq!(phase, CallPhase::Ended);
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_out_of_order_events_noop() {
        assert_eq!(CallPhase::Invited.apply(CallEvent::Answer), None);
        assert_eq!(CallPhase::Invited.apply(CallEvent::Offer), None);
        assert_eq!(CallPhase::Accepted.apply(CallEvent::Accept), None);
        assert_eq!(CallPhase::Active.apply(CallEvent::Offer), None);
    }

    #[test]
    fn test_disconnect_ends_any_live_phase() {
        for phase in [
            CallPhase::Invited,
            CallPhase::Accepted,
            CallPhase::Negotiating,
            CallPhase::Active,
        ] {
            assert_eq!(phase.apply(CallEvent::Disconnect), Some(CallPhase::Ended));
        }
    }

    #[test]
    fn test_connectivity_failure() {
        assert_eq!(
            CallPhase::Negotiating.apply(CallEvent::ConnectivityFailure),
            Some(CallPhase::Failed)
        );
        assert_eq!(
            CallPhase::Active.apply(CallEvent::ConnectivityFailure),
            Some(CallPhase::Failed)
        );
        // Failure before negotiation starts is not a defined transition
        assert_eq!(CallPhase::Invited.apply(CallEvent::ConnectivityFailure), None);
    }

    #[test]
    fn test_terminal_phases_absorb() {
        for event in [
            CallEvent::Accept,
            CallEvent::Offer,
            CallEvent::Answer,
            CallEvent::End,
            CallEvent::Disconnect,
            CallEvent::ConnectivityFailure,
        ] {
            assert_eq!(CallPhase::Ended.apply(event), None);
            assert_eq!(CallPhase::Failed.apply(event), None);
        }
    }
}
