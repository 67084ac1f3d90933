//! Wire protocol: envelope framing, typed payloads, candidate policy.
//!
//! The signaling wire is JSON with two layers of encoding: the outer frame
//! `{service, body}` carries `body` as a JSON-encoded *string* whose shape
//! depends solely on the service code. The double encoding is a server
//! compatibility requirement and is preserved exactly.
//!
//! All parsers are panic-free: malformed input is reported as `SigbeamError`
//! instead of panicking, keeping the client resilient to hostile or buggy
//! server traffic.

pub mod body;
pub mod candidate;
pub mod envelope;

pub use candidate::TurnPolicy;
pub use envelope::{Envelope, ServiceCode};
