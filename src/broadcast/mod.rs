//! Broadcast fanout coordinator state
//!
//! One publisher, many viewers. The coordinator manages the single global
//! session slot and a dynamic viewer set, and tells the publisher which
//! viewers are waiting for an offer. Actual negotiation rides the generic
//! signaling relay; per-viewer phases are advanced by observing which pairs
//! the relayed descriptions travel between.

pub mod state;
pub mod viewer;

pub use state::{AnnounceOutcome, BroadcastSession, BroadcastState};
pub use viewer::{ViewerEvent, ViewerPhase};
