//! Typed payloads for each service code (§ wire table).
//!
//! Field names mirror the wire exactly: requests use the server's camelCase
//! (`accessToken`, `roomId`, `toUser`), results use its snake_case
//! (`user_id`, `room_id`) plus the `r`/`msg`/`sic` result fields.
//!
//! Result semantics: an absent/`null` `r` is success for result-style
//! services; join-room success is specifically `r == 0`. A `null` `sic`
//! means "not yet available" and must suppress action, never fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// --------------------
// Requests (client -> server)
// --------------------

/// Service 1: authenticate with an access token obtained out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "isForCall")]
    pub is_for_call: bool,
}

/// Service 3: bind this connection to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    #[serde(rename = "roomId")]
    pub room_id: String,
}

/// Service 8: ask the server for a new room targeting a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeRoomRequest {
    #[serde(rename = "toUser")]
    pub to_user: String,
}

/// Services 10/11/13: session information tagged with the bound room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalPayload<T> {
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub sic: T,
}

/// Service 99 reply body (`{"body": null}` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingReply {
    pub body: Option<Value>,
}

impl PingReply {
    pub fn new() -> Self {
        Self { body: None }
    }
}

impl Default for PingReply {
    fn default() -> Self {
        Self::new()
    }
}

// --------------------
// Results (server -> client)
// --------------------

/// Service 1 result.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResult {
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Service 3 result. Success is `r == 0`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRoomResult {
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Service 4: unsolicited call invitation.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingJoin {
    pub room_id: String,
}

/// Service 8 result: the server assigned a room.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomCreated {
    pub room_id: String,
}

/// Services 10/11/13/99 inbound: optional result code plus optional
/// session-information-content.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalResult {
    #[serde(default)]
    pub r: Option<i64>,
    #[serde(default)]
    pub sic: Option<Value>,
}

// --------------------
// Session-information-content shapes
// --------------------

/// An SDP description as produced by the peer session (`{type, sdp}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: String,
    pub sdp: String,
}

/// A trickle ICE candidate (`{candidate, sdpMid, sdpMLineIndex}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(rename = "sdpMid", default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(
        rename = "sdpMLineIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sdp_mline_index: Option<u16>,
}
