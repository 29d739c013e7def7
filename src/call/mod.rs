//! Private call coordinator state
//!
//! Brokers operator-to-user call invitations: an invite only goes out to a
//! call-ready target, the accept handshake hands each side the other's
//! connection id, and from there negotiation rides the generic signaling
//! relay. The coordinator's one hard guarantee is that an end, explicit or
//! disconnect-driven, reaches the surviving participant so it can tear down
//! local resources. It never validates media connectivity; that is endpoint
//! responsibility.

pub mod session;
pub mod table;

pub use session::{CallEvent, CallPhase};
pub use table::{CallKey, CallTable};
