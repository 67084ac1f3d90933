//! Shared error type across sigbeam crates.

use thiserror::Error;

/// Stable failure classification (used in logs and user-facing reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Undecodable wire frame.
    Malformed,
    /// Server reported a non-success result code.
    Protocol,
    /// Peer-session capability failed.
    Peer,
    /// Local media acquisition failed.
    Media,
    /// Outbound channel failed.
    Transport,
    /// Config parse/validation failed.
    Config,
    /// Internal invariant breakage.
    Internal,
}

impl FailureKind {
    /// String representation used in logs and notifications.
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Malformed => "MALFORMED_ENVELOPE",
            FailureKind::Protocol => "PROTOCOL_RESULT",
            FailureKind::Peer => "PEER_SESSION",
            FailureKind::Media => "MEDIA",
            FailureKind::Transport => "TRANSPORT",
            FailureKind::Config => "BAD_CONFIG",
            FailureKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SigbeamError>;

/// Unified error type used by the protocol core and the client engine.
#[derive(Debug, Error)]
pub enum SigbeamError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("protocol failure (r={code}): {msg}")]
    Protocol { code: i64, msg: String },
    #[error("peer session: {0}")]
    Peer(String),
    #[error("media: {0}")]
    Media(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl SigbeamError {
    /// Map internal error to a stable failure kind.
    pub fn kind(&self) -> FailureKind {
        match self {
            SigbeamError::MalformedEnvelope(_) => FailureKind::Malformed,
            SigbeamError::Protocol { .. } => FailureKind::Protocol,
            SigbeamError::Peer(_) => FailureKind::Peer,
            SigbeamError::Media(_) => FailureKind::Media,
            SigbeamError::Transport(_) => FailureKind::Transport,
            SigbeamError::BadConfig(_) => FailureKind::Config,
            SigbeamError::Internal(_) => FailureKind::Internal,
        }
    }
}
