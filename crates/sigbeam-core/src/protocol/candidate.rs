//! TURN-only candidate admission policy.
//!
//! The candidate's connection type is the 8th whitespace-delimited token of
//! its textual description (`... typ host ...`). The position is fixed by the
//! protocol; do not replace it with a full SDP grammar.

/// Candidate admission policy, fixed at engine start.
#[derive(Debug, Clone, Copy)]
pub struct TurnPolicy {
    turn_only: bool,
}

impl TurnPolicy {
    pub fn new(turn_only: bool) -> Self {
        Self { turn_only }
    }

    pub fn turn_only(&self) -> bool {
        self.turn_only
    }

    /// Whether a candidate with this textual description may be applied.
    ///
    /// A description whose type token cannot be extracted is never admitted;
    /// that includes the empty end-of-candidates marker.
    pub fn admits(&self, description: &str) -> bool {
        match connection_type(description) {
            None => false,
            Some(typ) => !self.turn_only || typ == "relay",
        }
    }
}

/// Extract the connection-type token, if present.
pub fn connection_type(description: &str) -> Option<&str> {
    description.split_whitespace().nth(7)
}
