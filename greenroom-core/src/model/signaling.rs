use crate::model::connection::{ConnectionId, UserId};
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One visible room member, as carried in member lists and presence
/// events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomMember {
    pub user_id: UserId,
    pub connection_id: ConnectionId,
}

/// Events a client sends to the relay.
///
/// Negotiation payloads (`offer`, `answer`, `candidate`) are opaque:
/// the relay forwards them verbatim and never inspects their
/// structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
#[serde(rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinRoom {
        room_id: RoomId,
        user_id: UserId,
    },
    Offer {
        offer: Value,
        room_id: RoomId,
        target_connection_id: ConnectionId,
    },
    Answer {
        answer: Value,
        room_id: RoomId,
        target_connection_id: ConnectionId,
    },
    IceCandidate {
        candidate: Value,
        room_id: RoomId,
        target_connection_id: ConnectionId,
    },
    CodeChange {
        room_id: RoomId,
        code: String,
        language: String,
    },
}

/// Events the relay sends to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
#[serde(rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Sent to the joiner: its own connection id and the room
    /// membership as observed atomically at join time (joiner
    /// excluded).
    RoomJoined {
        connection_id: ConnectionId,
        members: Vec<RoomMember>,
    },
    /// Sent to pre-existing members when a new one joins.
    UserJoined {
        user_id: UserId,
        connection_id: ConnectionId,
    },
    /// Sent to remaining members when one departs.
    UserLeft {
        user_id: UserId,
    },
    Offer {
        offer: Value,
        sender_connection_id: ConnectionId,
    },
    Answer {
        answer: Value,
        sender_connection_id: ConnectionId,
    },
    IceCandidate {
        candidate: Value,
        sender_connection_id: ConnectionId,
    },
    CodeChange {
        code: String,
        language: String,
    },
    /// Protocol-error report, delivered only to the offending sender.
    Error {
        message: String,
    },
}
