//! Wire message taxonomy
//!
//! All traffic on a signaling connection is JSON text frames carrying one
//! internally tagged message. Tag strings are stable protocol surface; session
//! descriptions and connectivity candidates are opaque `serde_json::Value`s
//! that the relay forwards without inspection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{ConnectionId, UserId};

/// Messages sent from a client to the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Bind this connection to an application identity (or clear the binding
    /// by sending no user id)
    #[serde(rename = "identify")]
    Identify {
        #[serde(default)]
        user_id: Option<UserId>,
        #[serde(default)]
        is_operator: bool,
    },

    /// Operator asks for a fresh presence snapshot of one user
    #[serde(rename = "operator.checkStatus")]
    CheckStatus { target_user_id: UserId },

    /// The bound user is on the call-waiting surface and may receive invites
    #[serde(rename = "call.ready")]
    CallReady,

    /// The bound user left the call-waiting surface
    #[serde(rename = "call.unready")]
    CallUnready,

    /// Operator invites a call-ready user to a private call
    #[serde(rename = "call.invite")]
    CallInvite {
        target_user_id: UserId,
        operator_name: String,
    },

    /// Invited user accepts; routed back to the inviting operator
    #[serde(rename = "call.accept")]
    CallAccept { operator_connection_id: ConnectionId },

    /// Relay a session description offer to a peer connection
    #[serde(rename = "sdp.offer")]
    SdpOffer {
        target_connection_id: ConnectionId,
        description: Value,
    },

    /// Relay a session description answer to a peer connection
    #[serde(rename = "sdp.answer")]
    SdpAnswer {
        target_connection_id: ConnectionId,
        description: Value,
    },

    /// Relay a connectivity candidate to a peer connection
    #[serde(rename = "ice.candidate")]
    IceCandidate {
        target_connection_id: ConnectionId,
        candidate: Value,
    },

    /// Tell a peer connection the call is over
    #[serde(rename = "call.end")]
    CallEnd { target_connection_id: ConnectionId },

    /// This connection is now on the broadcast viewing surface
    #[serde(rename = "viewer.announce")]
    ViewerAnnounce,

    /// This connection left the broadcast viewing surface
    #[serde(rename = "viewer.leave")]
    ViewerLeave,

    /// Operator starts the single global broadcast session
    #[serde(rename = "broadcast.start")]
    BroadcastStart {
        title: String,
        subtitle: String,
        access_flag: bool,
    },

    /// Publisher ends the broadcast session
    #[serde(rename = "broadcast.end")]
    BroadcastEnd,
}

/// Messages sent from the relay to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// First message on every connection: your own connection id
    #[serde(rename = "hello")]
    Hello { connection_id: ConnectionId },

    /// Registry state change, fanned out to operator connections
    #[serde(rename = "presenceUpdate")]
    PresenceUpdate {
        user_id: UserId,
        connected: bool,
        call_ready: bool,
    },

    /// A private call invitation, delivered to the call-ready target
    #[serde(rename = "call.invited")]
    CallInvited {
        operator_connection_id: ConnectionId,
        operator_name: String,
    },

    /// The target accepted; delivered to the inviting operator
    #[serde(rename = "call.accepted")]
    CallAccepted {
        target_connection_id: ConnectionId,
        target_user_id: UserId,
    },

    /// A relayed session description offer
    #[serde(rename = "sdp.offerReceived")]
    SdpOfferReceived {
        sender_connection_id: ConnectionId,
        description: Value,
    },

    /// A relayed session description answer
    #[serde(rename = "sdp.answerReceived")]
    SdpAnswerReceived {
        sender_connection_id: ConnectionId,
        description: Value,
    },

    /// A relayed connectivity candidate
    #[serde(rename = "ice.candidateReceived")]
    IceCandidateReceived {
        sender_connection_id: ConnectionId,
        candidate: Value,
    },

    /// The peer ended the call (explicitly or by disconnecting)
    #[serde(rename = "call.ended")]
    CallEnded,

    /// A viewer is waiting for an offer; delivered to the publisher
    #[serde(rename = "broadcast.viewerRequest")]
    ViewerRequest { viewer_connection_id: ConnectionId },

    /// Broadcast session header, delivered to viewing-surface connections
    #[serde(rename = "broadcast.info")]
    BroadcastInfo { title: String, subtitle: String },

    /// The broadcast session is over
    #[serde(rename = "broadcast.ended")]
    BroadcastEnded,
}
