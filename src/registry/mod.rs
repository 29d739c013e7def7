//! Connection registry for presence tracking
//!
//! The registry is a bidirectional map between live transport connections and
//! optional application identities, with two per-identity flags: is-operator
//! and call-ready.
//!
//! # Architecture
//!
//! ```text
//!                      PresenceRegistry
//!         ┌──────────────────────────────────────┐
//!         │ connections: ConnectionId ->         │
//!         │   ConnectionEntry { user_id?,        │
//!         │                     is_operator }    │
//!         │ presence: UserId ->                  │
//!         │   PresenceEntry { connection_id?,    │
//!         │                   call_ready }       │
//!         └──────────────────────────────────────┘
//! ```
//!
//! A user has at most one live connection at any instant: a later identify
//! for the same user id displaces the earlier connection rather than being
//! rejected. Presence entries survive disconnects with their connection id
//! and ready flag cleared, so stale flags never outlive the connection that
//! set them.

pub mod entry;
pub mod store;

pub use entry::{ConnectionEntry, PresenceEntry, PresenceStatus};
pub use store::PresenceRegistry;
