//! Per-viewer negotiation state
//!
//! Each viewer of the broadcast session negotiates its own media path with
//! the publisher. The phase here is informational bookkeeping: delivery of
//! relayed descriptions is never gated on it, and teardown is disconnect
//! driven, not phase driven.

/// Negotiation phase of one viewer entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerPhase {
    /// Viewer announced; publisher asked to send an offer
    Requested,
    /// Publisher's offer relayed to the viewer
    OfferSent,
    /// Viewer's answer relayed back to the publisher
    AnswerReceived,
    /// Endpoint connectivity reported success
    Connected,
}

/// Events that advance a viewer entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Publisher sent this viewer a session description offer
    Offer,
    /// Viewer sent the publisher a session description answer
    Answer,
    /// Endpoint connectivity succeeded
    Connected,
}

impl ViewerPhase {
    /// Apply an event, returning the next phase
    ///
    /// Returns `None` for anything not in the table.
    pub fn apply(self, event: ViewerEvent) -> Option<ViewerPhase> {
        use ViewerEvent::*;
        use ViewerPhase::*;

        match (self, event) {
            (Requested, Offer) => Some(OfferSent),
            (OfferSent, Answer) => Some(AnswerReceived),
            (AnswerReceived, ViewerEvent::Connected) => Some(ViewerPhase::Connected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negotiation_order() {
        let phase = ViewerPhase::Requested;
        let phase = phase.apply(ViewerEvent::Offer).unwrap();
        assert_eq!(phase, ViewerPhase::OfferSent);

        let phase = phase.apply(ViewerEvent::Answer).unwrap();
        assert_eq!(phase, ViewerPhase::AnswerReceived);

        let phase = phase.apply(ViewerEvent::Connected).unwrap();
        assert_eq!(phase, ViewerPhase::Connected);
    }

    #[test]
    fn test_out_of_order_noop() {
        assert_eq!(ViewerPhase::Requested.apply(ViewerEvent::Answer), None);
        assert_eq!(ViewerPhase::OfferSent.apply(ViewerEvent::Offer), None);
        assert_eq!(ViewerPhase::Connected.apply(ViewerEvent::Offer), None);
    }
}
