//! Envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde_json::json;

use sigbeam_core::error::SigbeamError;
use sigbeam_core::protocol::body::{
    AuthResult, IceCandidate, SessionDescription, SignalResult,
};
use sigbeam_core::protocol::{Envelope, ServiceCode};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn parse_auth_result() {
    let env = Envelope::decode(&load("auth_result.json")).unwrap();
    assert_eq!(env.service, 1);
    assert_eq!(ServiceCode::from_wire(env.service), Some(ServiceCode::Authenticate));
    let body: AuthResult = env.body_as().unwrap().unwrap();
    assert_eq!(body.r, None);
    assert_eq!(body.user_id.as_deref(), Some("u1"));
}

#[test]
fn parse_offer_in() {
    let env = Envelope::decode(&load("offer_in.json")).unwrap();
    assert_eq!(ServiceCode::from_wire(env.service), Some(ServiceCode::Offer));
    let body: SignalResult = env.body_as().unwrap().unwrap();
    assert_eq!(body.r, None);
    let desc: SessionDescription = serde_json::from_value(body.sic.unwrap()).unwrap();
    assert_eq!(desc.kind, "offer");
    assert!(desc.sdp.starts_with("v=0"));
}

#[test]
fn parse_candidate_in() {
    let env = Envelope::decode(&load("candidate_in.json")).unwrap();
    assert_eq!(ServiceCode::from_wire(env.service), Some(ServiceCode::IceCandidate));
    let body: SignalResult = env.body_as().unwrap().unwrap();
    let cand: IceCandidate = serde_json::from_value(body.sic.unwrap()).unwrap();
    assert!(cand.candidate.starts_with("candidate:"));
    assert_eq!(cand.sdp_mid.as_deref(), Some("0"));
    assert_eq!(cand.sdp_mline_index, Some(0));
}

#[test]
fn parse_ping_bare() {
    let env = Envelope::decode(&load("ping_bare.json")).unwrap();
    assert_eq!(ServiceCode::from_wire(env.service), Some(ServiceCode::Ping));
    assert!(env.body.is_none());
    let body: Option<SignalResult> = env.body_as().unwrap();
    assert!(body.is_none());
}

#[test]
fn unknown_code_decodes() {
    // A well-formed frame with a code outside the closed set still decodes;
    // routing decides to drop it.
    let env = Envelope::decode(&load("unknown_code.json")).unwrap();
    assert_eq!(env.service, 42);
    assert_eq!(ServiceCode::from_wire(env.service), None);
}

#[test]
fn malformed_frame_rejected() {
    let err = Envelope::decode("{ not json").expect_err("must fail");
    assert!(matches!(err, SigbeamError::MalformedEnvelope(_)));
    assert_eq!(err.kind().as_str(), "MALFORMED_ENVELOPE");
}

#[test]
fn malformed_inner_body_rejected() {
    let env = Envelope::decode(r#"{"service":1,"body":"{ not json"}"#).unwrap();
    let err = env.body_as::<AuthResult>().expect_err("must fail");
    assert!(matches!(err, SigbeamError::MalformedEnvelope(_)));
}

#[test]
fn double_encoding_is_preserved() {
    let env = Envelope::encode(
        ServiceCode::JoinRoom,
        &json!({"roomId": "r1"}),
    )
    .unwrap();
    let frame = env.to_frame().unwrap();
    // The body must arrive as a nested JSON *string*, not an object.
    assert!(frame.contains(r#""body":"{"#));
    assert!(frame.contains(r#"\"roomId\""#));
}

#[test]
fn round_trip_every_service_code() {
    let cases = [
        (ServiceCode::Authenticate, json!({"accessToken": "t", "isForCall": true})),
        (ServiceCode::JoinRoom, json!({"roomId": "r1"})),
        (ServiceCode::IncomingJoinRequest, json!({"room_id": "r1"})),
        (ServiceCode::MakeRoom, json!({"toUser": "u2"})),
        (ServiceCode::Offer, json!({"roomId": "r1", "sic": {"type": "offer", "sdp": "v=0"}})),
        (
            ServiceCode::IceCandidate,
            json!({"roomId": "r1", "sic": {"candidate": "candidate:1 1 udp 1 h 1 typ host"}}),
        ),
        (ServiceCode::Answer, json!({"roomId": "r1", "sic": {"type": "answer", "sdp": "v=0"}})),
        (ServiceCode::Ping, json!({"body": null})),
    ];

    for (code, body) in cases {
        let frame = Envelope::encode(code, &body).unwrap().to_frame().unwrap();
        let decoded = Envelope::decode(&frame).unwrap();
        assert_eq!(ServiceCode::from_wire(decoded.service), Some(code));
        let round: serde_json::Value = decoded.body_as().unwrap().unwrap();
        assert_eq!(round, body, "body mismatch for {code:?}");
    }
}
