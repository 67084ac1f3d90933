//! Thin handlers bridging the dispatcher to the session coordinator.
//!
//! Each handler deserializes its typed body and delegates; all sequencing
//! decisions live in the coordinator. A result-style frame with no body is
//! noise and gets dropped.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use sigbeam_core::error::Result;
use sigbeam_core::protocol::body::{
    AuthResult, IncomingJoin, JoinRoomResult, RoomCreated, SignalResult,
};
use sigbeam_core::protocol::ServiceCode;

use crate::dispatch::{body_into, SignalService};
use crate::session::SessionCoordinator;

/// Service 1: authenticate result.
pub struct AuthService {
    coord: Arc<SessionCoordinator>,
}

impl AuthService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for AuthService {
    fn code(&self) -> ServiceCode {
        ServiceCode::Authenticate
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(res) = body_into::<AuthResult>(body)? else {
            tracing::debug!("authenticate result without body, dropped");
            return Ok(());
        };
        self.coord.on_authenticated(res).await
    }
}

/// Service 3: join-room result.
pub struct JoinRoomService {
    coord: Arc<SessionCoordinator>,
}

impl JoinRoomService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for JoinRoomService {
    fn code(&self) -> ServiceCode {
        ServiceCode::JoinRoom
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(res) = body_into::<JoinRoomResult>(body)? else {
            tracing::debug!("join result without body, dropped");
            return Ok(());
        };
        self.coord.on_join_result(res).await
    }
}

/// Service 4: unsolicited call invitation.
pub struct IncomingJoinService {
    coord: Arc<SessionCoordinator>,
}

impl IncomingJoinService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for IncomingJoinService {
    fn code(&self) -> ServiceCode {
        ServiceCode::IncomingJoinRequest
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(req) = body_into::<IncomingJoin>(body)? else {
            tracing::debug!("invitation without body, dropped");
            return Ok(());
        };
        self.coord.on_incoming_join(req).await
    }
}

/// Service 8: room-creation result.
pub struct MakeRoomService {
    coord: Arc<SessionCoordinator>,
}

impl MakeRoomService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for MakeRoomService {
    fn code(&self) -> ServiceCode {
        ServiceCode::MakeRoom
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(res) = body_into::<RoomCreated>(body)? else {
            tracing::debug!("room creation result without body, dropped");
            return Ok(());
        };
        self.coord.on_room_created(res).await
    }
}

/// Service 10: remote offer.
pub struct OfferService {
    coord: Arc<SessionCoordinator>,
}

impl OfferService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for OfferService {
    fn code(&self) -> ServiceCode {
        ServiceCode::Offer
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(res) = body_into::<SignalResult>(body)? else {
            return Ok(());
        };
        self.coord.on_offer(res).await
    }
}

/// Service 11: remote trickle candidate.
pub struct CandidateService {
    coord: Arc<SessionCoordinator>,
}

impl CandidateService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for CandidateService {
    fn code(&self) -> ServiceCode {
        ServiceCode::IceCandidate
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(res) = body_into::<SignalResult>(body)? else {
            return Ok(());
        };
        self.coord.on_candidate(res).await
    }
}

/// Service 13: remote answer.
pub struct AnswerService {
    coord: Arc<SessionCoordinator>,
}

impl AnswerService {
    pub fn new(coord: Arc<SessionCoordinator>) -> Self {
        Self { coord }
    }
}

#[async_trait]
impl SignalService for AnswerService {
    fn code(&self) -> ServiceCode {
        ServiceCode::Answer
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let Some(res) = body_into::<SignalResult>(body)? else {
            return Ok(());
        };
        self.coord.on_answer(res).await
    }
}
