//! Hub statistics
//!
//! Lifetime counters plus a point-in-time snapshot of hub state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters maintained by the hub
#[derive(Debug, Default)]
pub struct HubCounters {
    /// Connections accepted over the hub's lifetime
    pub connections_total: AtomicU64,
    /// Messages handed to a live target outbox
    pub messages_relayed: AtomicU64,
    /// Messages dropped because the target was gone
    pub messages_dropped: AtomicU64,
}

impl HubCounters {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_connection(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_relayed(&self) {
        self.messages_relayed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.messages_dropped.fetch_add(1, Ordering::Relaxed);
    }
}

/// Point-in-time hub snapshot
#[derive(Debug, Clone)]
pub struct HubStats {
    /// Currently attached connections
    pub active_connections: usize,
    /// Users with a live identified connection
    pub identified_users: usize,
    /// Connections flagged as operators
    pub operator_connections: usize,
    /// Whether a broadcast session is active
    pub broadcast_active: bool,
    /// Tracked viewer entries for the active session
    pub viewer_count: usize,
    /// In-flight private call sessions
    pub call_sessions: usize,
    /// Connections accepted over the hub's lifetime
    pub connections_total: u64,
    /// Messages handed to a live target outbox
    pub messages_relayed: u64,
    /// Messages dropped because the target was gone
    pub messages_dropped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let counters = HubCounters::new();

        counters.record_connection();
        counters.record_connection();
        counters.record_relayed();
        counters.record_dropped();

        assert_eq!(counters.connections_total.load(Ordering::Relaxed), 2);
        assert_eq!(counters.messages_relayed.load(Ordering::Relaxed), 1);
        assert_eq!(counters.messages_dropped.load(Ordering::Relaxed), 1);
    }
}
