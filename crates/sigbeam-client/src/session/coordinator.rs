//! Session coordinator: owns the call state and drives the peer session.
//!
//! Every entry point locks the session mutex for its whole body, so each
//! handler runs to completion before the next one observes the state. That is
//! the single mutual-exclusion boundary the machine needs; handler bodies
//! read-then-write across suspension points and are not reentrant-safe.
//!
//! Failure policy: server-reported result failures are surfaced to the user
//! and return the machine to the nearest stable prior state; nothing is ever
//! retried automatically. Capability failures propagate to the engine loop,
//! which logs and counts them without touching state.

use std::sync::Arc;

use tokio::sync::Mutex;

use sigbeam_core::error::{FailureKind, Result, SigbeamError};
use sigbeam_core::protocol::body::{
    AuthRequest, AuthResult, IceCandidate, IncomingJoin, JoinRoomRequest, JoinRoomResult,
    MakeRoomRequest, RoomCreated, SessionDescription, SignalPayload, SignalResult,
};
use sigbeam_core::protocol::{Envelope, ServiceCode, TurnPolicy};

use crate::capabilities::{CallPrompt, MediaSource, MediaStream, PeerSession, UserNotifier};
use crate::obs::EngineMetrics;
use crate::session::state::{CallState, NegotiationPhase, Role, SessionState};
use crate::transport::EnvelopeSink;

pub struct SessionCoordinator {
    state: Mutex<SessionState>,
    peer: Arc<dyn PeerSession>,
    media: Arc<dyn MediaSource>,
    prompt: Arc<dyn CallPrompt>,
    notifier: Arc<dyn UserNotifier>,
    outbound: EnvelopeSink,
    policy: TurnPolicy,
    metrics: Arc<EngineMetrics>,
}

impl SessionCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        peer: Arc<dyn PeerSession>,
        media: Arc<dyn MediaSource>,
        prompt: Arc<dyn CallPrompt>,
        notifier: Arc<dyn UserNotifier>,
        outbound: EnvelopeSink,
        policy: TurnPolicy,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            peer,
            media,
            prompt,
            notifier,
            outbound,
            policy,
            metrics,
        }
    }

    /// Current phase (snapshot).
    pub async fn phase(&self) -> CallState {
        self.state.lock().await.phase
    }

    /// Currently bound room, if any (snapshot).
    pub async fn room_id(&self) -> Option<String> {
        self.state.lock().await.room_id.clone()
    }

    // --------------------
    // User-driven entry points
    // --------------------

    /// External login completed; present the token to the server.
    pub async fn authenticate(&self, access_token: String) -> Result<()> {
        let mut s = self.state.lock().await;
        if !matches!(s.phase, CallState::Idle | CallState::Authenticating) {
            tracing::warn!(phase = ?s.phase, "authenticate ignored, already authenticated");
            return Ok(());
        }
        let body = AuthRequest {
            access_token,
            is_for_call: true,
        };
        self.outbound
            .send(&Envelope::encode(ServiceCode::Authenticate, &body)?)
            .await?;
        s.phase = CallState::Authenticating;
        Ok(())
    }

    /// Request a new room for a target user (the caller path).
    pub async fn place_call(&self, to_user: &str) -> Result<()> {
        let mut s = self.state.lock().await;
        if !s.phase.can_place_call() {
            tracing::warn!(phase = ?s.phase, "call ignored, not in a callable state");
            return Ok(());
        }
        let body = MakeRoomRequest {
            to_user: to_user.to_string(),
        };
        self.outbound
            .send(&Envelope::encode(ServiceCode::MakeRoom, &body)?)
            .await?;
        s.phase = CallState::RoomPending;
        Ok(())
    }

    // --------------------
    // Inbound protocol events
    // --------------------

    /// Service 1 result.
    pub async fn on_authenticated(&self, res: AuthResult) -> Result<()> {
        let mut s = self.state.lock().await;
        if let Some(code) = res.r {
            // Fatal for this attempt; no automatic retry.
            self.notifier.failure(
                FailureKind::Protocol.as_str(),
                &format!("authentication failed (r={code})"),
            );
            return Ok(());
        }
        if !matches!(s.phase, CallState::Idle | CallState::Authenticating) {
            tracing::debug!(phase = ?s.phase, "duplicate authenticate result ignored");
            return Ok(());
        }
        s.phase = CallState::Authenticated;
        s.user_id = res.user_id.clone();
        let user = res.user_id.as_deref().unwrap_or("");
        tracing::info!(user, "authenticated");
        self.notifier.authenticated(user);
        Ok(())
    }

    /// Service 8 result: the server assigned our room.
    pub async fn on_room_created(&self, res: RoomCreated) -> Result<()> {
        let mut s = self.state.lock().await;
        if !matches!(s.phase, CallState::RoomPending) {
            tracing::debug!(phase = ?s.phase, "room creation result ignored");
            return Ok(());
        }
        tracing::info!(room = %res.room_id, "room created, joining");
        s.room_id = Some(res.room_id.clone());
        self.ensure_media(&mut s).await?;
        self.outbound
            .send(&Envelope::encode(
                ServiceCode::JoinRoom,
                &JoinRoomRequest {
                    room_id: res.room_id,
                },
            )?)
            .await?;
        s.phase = CallState::RoomJoined(Role::Caller);
        self.start_offer(&mut s).await
    }

    /// Service 3 result.
    pub async fn on_join_result(&self, res: JoinRoomResult) -> Result<()> {
        let mut s = self.state.lock().await;
        if res.r != Some(0) {
            let code = res.r.unwrap_or(-1);
            let msg = res.msg.as_deref().unwrap_or("join room failed");
            tracing::warn!(code, msg, "join room rejected");
            if matches!(
                s.phase,
                CallState::RoomJoined(_) | CallState::Negotiating(_) | CallState::RoomPending
            ) {
                s.room_id = None;
                s.phase = CallState::Authenticated;
            }
            self.notifier.failure(
                FailureKind::Protocol.as_str(),
                &format!("join room error (r={code}): {msg}"),
            );
            return Ok(());
        }
        match s.phase {
            // Normally the offer already went out with room creation; this
            // covers a server that acks the join before we got there.
            CallState::RoomJoined(Role::Caller) => self.start_offer(&mut s).await,
            CallState::RoomJoined(Role::Callee) => {
                tracing::debug!("join confirmed, awaiting offer");
                Ok(())
            }
            _ => {
                tracing::debug!(phase = ?s.phase, "duplicate join result ignored");
                Ok(())
            }
        }
    }

    /// Service 4: unsolicited call invitation (the callee path).
    pub async fn on_incoming_join(&self, req: IncomingJoin) -> Result<()> {
        let mut s = self.state.lock().await;
        if !matches!(s.phase, CallState::Authenticated) {
            tracing::debug!(phase = ?s.phase, room = %req.room_id, "invitation ignored");
            return Ok(());
        }
        if !self.prompt.accept_call(&req.room_id).await {
            // Declined: send nothing; the server times the request out.
            tracing::info!(room = %req.room_id, "incoming call declined");
            return Ok(());
        }
        self.ensure_media(&mut s).await?;
        s.room_id = Some(req.room_id.clone());
        self.outbound
            .send(&Envelope::encode(
                ServiceCode::JoinRoom,
                &JoinRoomRequest {
                    room_id: req.room_id,
                },
            )?)
            .await?;
        s.phase = CallState::RoomJoined(Role::Callee);
        Ok(())
    }

    /// Service 10 inbound: the remote offer.
    pub async fn on_offer(&self, res: SignalResult) -> Result<()> {
        let mut s = self.state.lock().await;
        let Some(sic) = ready_sic(res) else {
            return Ok(());
        };
        if !matches!(s.phase, CallState::RoomJoined(Role::Callee)) {
            tracing::debug!(phase = ?s.phase, "offer ignored in this phase");
            return Ok(());
        }
        let offer: SessionDescription = parse_sic(sic)?;
        self.peer.set_remote_description(offer).await?;
        self.ensure_media(&mut s).await?;
        s.phase = CallState::Negotiating(NegotiationPhase::Answering);

        let room = bound_room(&s)?;
        let answer = self.peer.create_answer().await?;
        // The answer envelope goes out before set_local_description resolves,
        // mirroring the offer path.
        self.outbound
            .send(&Envelope::encode(
                ServiceCode::Answer,
                &SignalPayload {
                    room_id: room,
                    sic: answer.clone(),
                },
            )?)
            .await?;
        self.peer.set_local_description(answer).await?;
        s.phase = CallState::Connected;
        tracing::info!("answer sent, session connected");
        Ok(())
    }

    /// Service 13 inbound: the remote answer.
    pub async fn on_answer(&self, res: SignalResult) -> Result<()> {
        let mut s = self.state.lock().await;
        let Some(sic) = ready_sic(res) else {
            return Ok(());
        };
        if !matches!(s.phase, CallState::Negotiating(NegotiationPhase::Offering)) {
            tracing::debug!(phase = ?s.phase, "answer ignored in this phase");
            return Ok(());
        }
        let answer: SessionDescription = parse_sic(sic)?;
        self.peer.set_remote_description(answer).await?;
        s.phase = CallState::Connected;
        tracing::info!("answer applied, session connected");
        Ok(())
    }

    /// Service 11 inbound: a remote trickle candidate. Accepted in any phase;
    /// duplicates are applied again, not deduplicated.
    pub async fn on_candidate(&self, res: SignalResult) -> Result<()> {
        let _s = self.state.lock().await;
        let Some(sic) = ready_sic(res) else {
            return Ok(());
        };
        let candidate: IceCandidate = parse_sic(sic)?;
        if !self.policy.admits(&candidate.candidate) {
            self.metrics.candidates_filtered.inc();
            tracing::trace!(candidate = %candidate.candidate, "candidate filtered");
            return Ok(());
        }
        self.peer.add_ice_candidate(candidate).await
    }

    // --------------------
    // Local peer-session events
    // --------------------

    /// A locally-discovered candidate. Sent whenever a room is bound,
    /// regardless of phase; dropped (not buffered) before room binding.
    pub async fn local_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let s = self.state.lock().await;
        let Some(room) = s.room_id.clone() else {
            self.metrics.candidates_dropped_no_room.inc();
            tracing::debug!("local candidate before room binding, dropped");
            return Ok(());
        };
        self.outbound
            .send(&Envelope::encode(
                ServiceCode::IceCandidate,
                &SignalPayload {
                    room_id: room,
                    sic: candidate,
                },
            )?)
            .await
    }

    /// The remote stream became available.
    pub async fn remote_stream(&self, stream: MediaStream) {
        tracing::info!(stream = %stream.id, "remote stream attached");
        self.notifier.remote_stream(&stream);
    }

    /// Terminal transport loss.
    pub async fn transport_closed(&self) {
        let mut s = self.state.lock().await;
        if s.phase.is_terminal() {
            return;
        }
        tracing::info!(phase = ?s.phase, "transport closed, session over");
        s.phase = CallState::Closed;
        self.notifier.disconnected();
    }

    // --------------------
    // Internals
    // --------------------

    /// Acquire (memoized by the source) and attach local media, once per call.
    async fn ensure_media(&self, s: &mut SessionState) -> Result<()> {
        if s.media_attached {
            return Ok(());
        }
        let stream = self.media.acquire().await?;
        self.notifier.local_stream(&stream);
        self.peer.attach_media(stream).await?;
        s.media_attached = true;
        Ok(())
    }

    /// Capture an offer and send it, then finish the local description.
    /// The envelope leaves before set_local_description resolves: the machine
    /// never blocks the handshake on local-description completion.
    async fn start_offer(&self, s: &mut SessionState) -> Result<()> {
        let room = bound_room(s)?;
        let offer = self.peer.create_offer().await?;
        self.outbound
            .send(&Envelope::encode(
                ServiceCode::Offer,
                &SignalPayload {
                    room_id: room,
                    sic: offer.clone(),
                },
            )?)
            .await?;
        s.phase = CallState::Negotiating(NegotiationPhase::Offering);
        self.peer.set_local_description(offer).await?;
        Ok(())
    }
}

/// `r == null` and `sic` present means "act"; anything else means "not yet".
fn ready_sic(res: SignalResult) -> Option<serde_json::Value> {
    if res.r.is_some() {
        return None;
    }
    res.sic
}

fn parse_sic<T: serde::de::DeserializeOwned>(sic: serde_json::Value) -> Result<T> {
    serde_json::from_value(sic)
        .map_err(|e| SigbeamError::MalformedEnvelope(format!("invalid sic payload: {e}")))
}

fn bound_room(s: &SessionState) -> Result<String> {
    s.room_id
        .clone()
        .ok_or_else(|| SigbeamError::Internal("no room bound".into()))
}
