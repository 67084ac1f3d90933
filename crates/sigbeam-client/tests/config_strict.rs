#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use sigbeam_client::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
signaling:
  server_url: "ws://sig.example:8088/ws"
call:
  turn_onli: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert!(!cfg.call.turn_only);
    assert_eq!(cfg.signaling.outbound_queue, 1024);
    assert_eq!(cfg.call.ice_servers, vec!["stun:stun.services.mozilla.com"]);
}

#[test]
fn turn_only_round_trips() {
    let cfg = config::load_from_str(
        r#"
version: 1
call:
  turn_only: true
  ice_servers: ["turn:turn.example:3478"]
"#,
    )
    .expect("must parse");
    assert!(cfg.call.turn_only);
}

#[test]
fn outbound_queue_range_checked() {
    let err = config::load_from_str(
        r#"
version: 1
signaling:
  outbound_queue: 10
"#,
    )
    .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn empty_ice_servers_rejected() {
    let err = config::load_from_str(
        r#"
version: 1
call:
  ice_servers: []
"#,
    )
    .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn unsupported_version_rejected() {
    let err = config::load_from_str("version: 2").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}
