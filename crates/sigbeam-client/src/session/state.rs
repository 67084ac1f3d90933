//! Explicit call-establishment state.
//!
//! UI affordances (whether the call button is live, etc.) are projections of
//! this machine, never a parallel source of truth.

/// Which side of the call this peer is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Caller,
    Callee,
}

/// Where the offer/answer exchange currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationPhase {
    Offering,
    Answering,
}

/// The call-establishment state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Idle,
    Authenticating,
    Authenticated,
    RoomPending,
    RoomJoined(Role),
    Negotiating(NegotiationPhase),
    Connected,
    Closed,
}

impl CallState {
    /// Whether the surrounding UI may offer the "call" action.
    pub fn can_place_call(&self) -> bool {
        matches!(self, CallState::Authenticated)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallState::Closed)
    }
}

/// Session state owned exclusively by the coordinator.
#[derive(Debug)]
pub struct SessionState {
    pub phase: CallState,
    /// Room identifier assigned by the server, echoed by both peers.
    pub room_id: Option<String>,
    /// Identity reported by the authenticate result.
    pub user_id: Option<String>,
    /// Local media has been attached to the peer session (once per call).
    pub media_attached: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: CallState::Idle,
            room_id: None,
            user_id: None,
            media_attached: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
