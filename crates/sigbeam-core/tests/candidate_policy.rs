//! TURN-only admission policy tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use sigbeam_core::protocol::candidate::{connection_type, TurnPolicy};

const HOST: &str = "candidate:1510613869 1 udp 2122260223 192.168.1.7 54321 typ host generation 0";
const RELAY: &str = "candidate:3098175849 1 udp 41885439 94.23.1.2 61052 typ relay raddr 94.23.1.2 rport 61052";
const SRFLX: &str = "candidate:842163049 1 udp 1677729535 94.23.1.1 3478 typ srflx raddr 192.168.1.7 rport 54321";

#[test]
fn type_is_the_eighth_token() {
    assert_eq!(connection_type(HOST), Some("host"));
    assert_eq!(connection_type(RELAY), Some("relay"));
    assert_eq!(connection_type(SRFLX), Some("srflx"));
}

#[test]
fn short_descriptions_have_no_type() {
    assert_eq!(connection_type(""), None);
    assert_eq!(connection_type("candidate:1 1 udp 1 h 1 typ"), None);
}

#[test]
fn turn_only_admits_relay_only() {
    let policy = TurnPolicy::new(true);
    assert!(policy.admits(RELAY));
    assert!(!policy.admits(HOST));
    assert!(!policy.admits(SRFLX));
}

#[test]
fn open_policy_admits_any_typed_candidate() {
    let policy = TurnPolicy::new(false);
    assert!(policy.admits(RELAY));
    assert!(policy.admits(HOST));
    assert!(policy.admits(SRFLX));
}

#[test]
fn untyped_candidates_are_never_admitted() {
    // Covers the empty end-of-candidates marker as well.
    assert!(!TurnPolicy::new(false).admits(""));
    assert!(!TurnPolicy::new(true).admits(""));
    assert!(!TurnPolicy::new(false).admits("candidate:1 1 udp 1"));
}
