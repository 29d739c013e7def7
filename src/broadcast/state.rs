//! Broadcast session state
//!
//! A single-slot register for the global broadcast session, a set of
//! connections on the viewing surface, and per-viewer negotiation entries.
//! The viewing-surface set outlives sessions (a viewer who stays on the page
//! is picked up by the next broadcast); viewer entries belong to one session
//! and are cleared with it.

use std::collections::{HashMap, HashSet};

use crate::protocol::ConnectionId;

use super::viewer::{ViewerEvent, ViewerPhase};

/// The active broadcast session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastSession {
    /// Connection currently publishing
    pub publisher: ConnectionId,
    /// Session title shown to viewers
    pub title: String,
    /// Session subtitle shown to viewers
    pub subtitle: String,
    /// Access restriction flag (enforced by the application layer, carried
    /// here as session metadata only)
    pub restricted: bool,
}

/// Result of a viewer announcing while state may or may not hold a session
#[derive(Debug, PartialEq, Eq)]
pub struct AnnounceOutcome {
    /// Publisher to send a `viewerRequest` to, when a session is active
    pub request_to: Option<ConnectionId>,
    /// Session header to send the announcing viewer, when a session is active
    pub info: Option<(String, String)>,
}

/// Broadcast fanout state: one session, many viewers
#[derive(Debug, Default)]
pub struct BroadcastState {
    /// Active session, if any (at most one system-wide)
    session: Option<BroadcastSession>,

    /// Connections on the viewing surface, independent of any session
    surface: HashSet<ConnectionId>,

    /// Per-viewer negotiation entries for the active session
    viewers: HashMap<ConnectionId, ViewerPhase>,
}

impl BroadcastState {
    /// Create empty broadcast state
    pub fn new() -> Self {
        Self::default()
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&BroadcastSession> {
        self.session.as_ref()
    }

    /// Whether the connection is the active publisher
    pub fn is_publisher(&self, connection_id: ConnectionId) -> bool {
        self.session
            .as_ref()
            .map(|s| s.publisher == connection_id)
            .unwrap_or(false)
    }

    /// Register a connection on the viewing surface
    ///
    /// If a session is active the viewer immediately gets an entry in
    /// `Requested` and the publisher is owed one `viewerRequest`. With no
    /// session the viewer simply waits on the surface.
    pub fn announce(&mut self, connection_id: ConnectionId) -> AnnounceOutcome {
        self.surface.insert(connection_id);

        match self.session {
            Some(ref session) if session.publisher != connection_id => {
                self.viewers.insert(connection_id, ViewerPhase::Requested);
                tracing::debug!(
                    viewer = %connection_id,
                    publisher = %session.publisher,
                    "Viewer joined active broadcast"
                );
                AnnounceOutcome {
                    request_to: Some(session.publisher),
                    info: Some((session.title.clone(), session.subtitle.clone())),
                }
            }
            _ => AnnounceOutcome {
                request_to: None,
                info: None,
            },
        }
    }

    /// Remove a connection from the viewing surface and the viewer set
    pub fn leave(&mut self, connection_id: ConnectionId) {
        self.surface.remove(&connection_id);
        self.viewers.remove(&connection_id);
    }

    /// Start a session (last start wins, superseding any active session)
    ///
    /// Every connection already on the viewing surface becomes a viewer entry
    /// in `Requested`; the returned list is the set the publisher is owed a
    /// `viewerRequest` for. The publisher never requests itself.
    pub fn start(
        &mut self,
        publisher: ConnectionId,
        title: String,
        subtitle: String,
        restricted: bool,
    ) -> Vec<ConnectionId> {
        if let Some(ref previous) = self.session {
            tracing::info!(
                old_publisher = %previous.publisher,
                new_publisher = %publisher,
                "Broadcast superseded"
            );
        }

        self.session = Some(BroadcastSession {
            publisher,
            title,
            subtitle,
            restricted,
        });

        self.viewers.clear();
        let pending: Vec<ConnectionId> = self
            .surface
            .iter()
            .copied()
            .filter(|&conn| conn != publisher)
            .collect();
        for &conn in &pending {
            self.viewers.insert(conn, ViewerPhase::Requested);
        }

        tracing::info!(publisher = %publisher, viewers = pending.len(), "Broadcast started");

        pending
    }

    /// End the session, but only for the connection that owns it
    ///
    /// Returns the tracked viewers owed a `broadcast.ended`, or `None` if the
    /// caller is not the active publisher. The viewing surface survives for
    /// the next session.
    pub fn end(&mut self, publisher: ConnectionId) -> Option<Vec<ConnectionId>> {
        if !self.is_publisher(publisher) {
            return None;
        }

        self.session = None;
        let viewers: Vec<ConnectionId> = self.viewers.drain().map(|(conn, _)| conn).collect();

        tracing::info!(publisher = %publisher, viewers = viewers.len(), "Broadcast ended");

        Some(viewers)
    }

    /// Handle a closed connection
    ///
    /// A viewer disconnect removes just that entry. A publisher disconnect
    /// ends the session; the returned list is the viewers owed a
    /// `broadcast.ended`.
    pub fn release(&mut self, connection_id: ConnectionId) -> Option<Vec<ConnectionId>> {
        self.surface.remove(&connection_id);
        self.viewers.remove(&connection_id);

        if self.is_publisher(connection_id) {
            self.end(connection_id)
        } else {
            None
        }
    }

    /// Record a relayed offer travelling publisher -> viewer
    pub fn observe_offer(&mut self, sender: ConnectionId, target: ConnectionId) {
        if self.is_publisher(sender) {
            self.advance(target, ViewerEvent::Offer);
        }
    }

    /// Record a relayed answer travelling viewer -> publisher
    pub fn observe_answer(&mut self, sender: ConnectionId, target: ConnectionId) {
        if self.is_publisher(target) {
            self.advance(sender, ViewerEvent::Answer);
        }
    }

    fn advance(&mut self, viewer: ConnectionId, event: ViewerEvent) {
        if let Some(phase) = self.viewers.get_mut(&viewer) {
            if let Some(next) = phase.apply(event) {
                *phase = next;
            }
        }
    }

    /// Negotiation phase of one viewer entry
    pub fn viewer_phase(&self, connection_id: ConnectionId) -> Option<ViewerPhase> {
        self.viewers.get(&connection_id).copied()
    }

    /// Connections currently on the viewing surface
    pub fn surface_connections(&self) -> Vec<ConnectionId> {
        self.surface.iter().copied().collect()
    }

    /// Number of tracked viewer entries
    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announce_without_session_waits() {
        let mut state = BroadcastState::new();
        let outcome = state.announce(ConnectionId(1));

        assert_eq!(outcome.request_to, None);
        assert_eq!(outcome.info, None);
        assert_eq!(state.viewer_count(), 0);
    }

    #[test]
    fn test_announce_during_session_requests_immediately() {
        let mut state = BroadcastState::new();
        state.start(ConnectionId(9), "Title".into(), "Sub".into(), false);

        let outcome = state.announce(ConnectionId(1));

        assert_eq!(outcome.request_to, Some(ConnectionId(9)));
        assert_eq!(outcome.info, Some(("Title".into(), "Sub".into())));
        assert_eq!(state.viewer_phase(ConnectionId(1)), Some(ViewerPhase::Requested));
    }

    #[test]
    fn test_start_fans_out_to_waiting_surface() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.announce(ConnectionId(2));

        let mut pending = state.start(ConnectionId(9), "T".into(), "S".into(), true);
        pending.sort_by_key(|c| c.0);

        assert_eq!(pending, vec![ConnectionId(1), ConnectionId(2)]);
        assert_eq!(state.viewer_count(), 2);
        assert!(state.session().unwrap().restricted);
    }

    #[test]
    fn test_publisher_on_surface_never_requests_itself() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(9));
        state.announce(ConnectionId(1));

        let pending = state.start(ConnectionId(9), "T".into(), "S".into(), false);

        assert_eq!(pending, vec![ConnectionId(1)]);
    }

    #[test]
    fn test_last_start_wins() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.start(ConnectionId(8), "First".into(), "".into(), false);
        state.start(ConnectionId(9), "Second".into(), "".into(), false);

        let session = state.session().unwrap();
        assert_eq!(session.publisher, ConnectionId(9));
        assert_eq!(session.title, "Second");
        // Viewer entries were rebuilt for the new session
        assert_eq!(state.viewer_phase(ConnectionId(1)), Some(ViewerPhase::Requested));
    }

    #[test]
    fn test_end_requires_owning_publisher() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.start(ConnectionId(9), "T".into(), "S".into(), false);

        assert_eq!(state.end(ConnectionId(7)), None);
        assert!(state.session().is_some());

        let ended = state.end(ConnectionId(9)).unwrap();
        assert_eq!(ended, vec![ConnectionId(1)]);
        assert!(state.session().is_none());
        assert_eq!(state.viewer_count(), 0);
        // Surface survives for the next session
        assert_eq!(state.surface_connections(), vec![ConnectionId(1)]);
    }

    #[test]
    fn test_leave_removes_surface_and_entry() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.announce(ConnectionId(2));
        state.start(ConnectionId(9), "T".into(), "S".into(), false);

        state.leave(ConnectionId(1));

        assert_eq!(state.viewer_count(), 1);
        assert!(!state.surface_connections().contains(&ConnectionId(1)));

        // A later session does not pick the departed viewer back up
        let pending = state.start(ConnectionId(9), "T2".into(), "".into(), false);
        assert_eq!(pending, vec![ConnectionId(2)]);
    }

    #[test]
    fn test_viewer_release_leaves_session_alone() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.announce(ConnectionId(2));
        state.start(ConnectionId(9), "T".into(), "S".into(), false);

        assert_eq!(state.release(ConnectionId(1)), None);
        assert!(state.session().is_some());
        assert_eq!(state.viewer_count(), 1);
    }

    #[test]
    fn test_publisher_release_ends_session() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.start(ConnectionId(9), "T".into(), "S".into(), false);

        let ended = state.release(ConnectionId(9)).unwrap();
        assert_eq!(ended, vec![ConnectionId(1)]);
        assert!(state.session().is_none());
    }

    #[test]
    fn test_observed_negotiation_advances_phase() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.start(ConnectionId(9), "T".into(), "S".into(), false);

        state.observe_offer(ConnectionId(9), ConnectionId(1));
        assert_eq!(state.viewer_phase(ConnectionId(1)), Some(ViewerPhase::OfferSent));

        state.observe_answer(ConnectionId(1), ConnectionId(9));
        assert_eq!(
            state.viewer_phase(ConnectionId(1)),
            Some(ViewerPhase::AnswerReceived)
        );
    }

    #[test]
    fn test_offer_from_non_publisher_not_recorded() {
        let mut state = BroadcastState::new();
        state.announce(ConnectionId(1));
        state.start(ConnectionId(9), "T".into(), "S".into(), false);

        state.observe_offer(ConnectionId(5), ConnectionId(1));
        assert_eq!(state.viewer_phase(ConnectionId(1)), Some(ViewerPhase::Requested));
    }
}
