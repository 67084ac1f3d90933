//! Signaling envelope (JSON, double-encoded body).
//!
//! The outer frame is `{"service": <int>, "body": "<json string>"}`. The
//! inner `body` is itself a JSON document; the codec never inspects it. It is
//! re-parsed lazily, once, at dispatch time by whichever handler owns the
//! service code.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SigbeamError};

/// Closed set of protocol service codes shared with the signaling server.
///
/// Codes are stable wire identifiers; adding one is a protocol-versioning
/// event, not a local refactor. Frames carrying a number outside this set
/// still decode; routing drops them silently for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCode {
    Authenticate,
    JoinRoom,
    IncomingJoinRequest,
    MakeRoom,
    Offer,
    IceCandidate,
    Answer,
    Ping,
}

impl ServiceCode {
    /// Wire integer for this code.
    pub fn wire(self) -> u16 {
        match self {
            ServiceCode::Authenticate => 1,
            ServiceCode::JoinRoom => 3,
            ServiceCode::IncomingJoinRequest => 4,
            ServiceCode::MakeRoom => 8,
            ServiceCode::Offer => 10,
            ServiceCode::IceCandidate => 11,
            ServiceCode::Answer => 13,
            ServiceCode::Ping => 99,
        }
    }

    /// Map a wire integer back into the closed set. `None` means the server
    /// sent a code this client does not understand yet.
    pub fn from_wire(code: u16) -> Option<ServiceCode> {
        match code {
            1 => Some(ServiceCode::Authenticate),
            3 => Some(ServiceCode::JoinRoom),
            4 => Some(ServiceCode::IncomingJoinRequest),
            8 => Some(ServiceCode::MakeRoom),
            10 => Some(ServiceCode::Offer),
            11 => Some(ServiceCode::IceCandidate),
            13 => Some(ServiceCode::Answer),
            99 => Some(ServiceCode::Ping),
            _ => None,
        }
    }
}

/// Wire envelope. Immutable once constructed; one is built per protocol event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Service code (raw wire integer, possibly outside the closed set).
    pub service: u16,
    /// Body as a JSON-encoded string. `None` serializes as a literal `null`
    /// (only the connect-time ping uses that form).
    #[serde(default)]
    pub body: Option<String>,
}

impl Envelope {
    /// Build an envelope by serializing `body` into the inner JSON string.
    pub fn encode<T: Serialize>(service: ServiceCode, body: &T) -> Result<Envelope> {
        let inner = serde_json::to_string(body)
            .map_err(|e| SigbeamError::Internal(format!("body encode failed: {e}")))?;
        Ok(Envelope {
            service: service.wire(),
            body: Some(inner),
        })
    }

    /// Build an envelope with a literal `null` body.
    pub fn bare(service: ServiceCode) -> Envelope {
        Envelope {
            service: service.wire(),
            body: None,
        }
    }

    /// Parse the outer frame only. The inner body string stays untouched.
    pub fn decode(raw: &str) -> Result<Envelope> {
        serde_json::from_str(raw)
            .map_err(|e| SigbeamError::MalformedEnvelope(format!("invalid frame json: {e}")))
    }

    /// Serialize the outer frame for the transport.
    pub fn to_frame(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SigbeamError::Internal(format!("frame encode failed: {e}")))
    }

    /// Re-parse the inner body into a typed payload. A `null`/absent body is
    /// surfaced as `None`, not an error.
    pub fn body_as<T: serde::de::DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.body {
            None => Ok(None),
            Some(inner) => {
                let parsed = serde_json::from_str(inner).map_err(|e| {
                    SigbeamError::MalformedEnvelope(format!("invalid body json: {e}"))
                })?;
                Ok(Some(parsed))
            }
        }
    }
}
