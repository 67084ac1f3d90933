//! Engine event loop.
//!
//! Single-consumer, cooperative: all work happens in reaction to a user
//! command, a transport event, or a peer-session event, multiplexed through
//! one `select!` loop. Ordering guarantees derive from the transport's
//! in-order delivery plus each dispatch running to completion before the next
//! event is taken.

use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;

use sigbeam_core::error::Result;
use sigbeam_core::protocol::{Envelope, TurnPolicy};

use crate::capabilities::{
    AccessTokenProvider, CallPrompt, MediaSource, PeerEvent, PeerSession, UserNotifier,
};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::liveness::{LivenessMonitor, PingService};
use crate::obs::EngineMetrics;
use crate::services::{
    AnswerService, AuthService, CandidateService, IncomingJoinService, JoinRoomService,
    MakeRoomService, OfferService,
};
use crate::session::SessionCoordinator;
use crate::transport::{EnvelopeSink, TransportEvent};

/// User-interaction events fed into the engine.
#[derive(Debug, Clone)]
pub enum Command {
    /// Exchange credentials for a token, then authenticate the channel.
    Login { username: String, password: String },
    /// Place a call to a user id.
    Call { to_user: String },
}

pub struct CallEngine<T> {
    dispatcher: Arc<Dispatcher>,
    coordinator: Arc<SessionCoordinator>,
    liveness: LivenessMonitor,
    metrics: Arc<EngineMetrics>,
    notifier: Arc<dyn UserNotifier>,
    login: Arc<dyn AccessTokenProvider>,
    commands: mpsc::Receiver<Command>,
    transport: T,
    peer_events: mpsc::Receiver<PeerEvent>,
}

impl<T> CallEngine<T>
where
    T: Stream<Item = TransportEvent> + Unpin,
{
    /// Wire the engine. Returns the command sender for the surrounding UI and
    /// the outbound frame queue the transport implementation must drain.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cfg: &ClientConfig,
        transport: T,
        peer: Arc<dyn PeerSession>,
        peer_events: mpsc::Receiver<PeerEvent>,
        media: Arc<dyn MediaSource>,
        prompt: Arc<dyn CallPrompt>,
        notifier: Arc<dyn UserNotifier>,
        login: Arc<dyn AccessTokenProvider>,
    ) -> (Self, mpsc::Sender<Command>, mpsc::Receiver<String>) {
        let metrics = Arc::new(EngineMetrics::default());
        let (out_tx, out_rx) = mpsc::channel(cfg.signaling.outbound_queue);
        let sink = EnvelopeSink::new(out_tx, metrics.clone());

        let coordinator = Arc::new(SessionCoordinator::new(
            peer,
            media,
            prompt,
            notifier.clone(),
            sink.clone(),
            TurnPolicy::new(cfg.call.turn_only),
            metrics.clone(),
        ));

        let dispatcher = Dispatcher::new(metrics.clone());
        dispatcher.register(Arc::new(AuthService::new(coordinator.clone())));
        dispatcher.register(Arc::new(JoinRoomService::new(coordinator.clone())));
        dispatcher.register(Arc::new(IncomingJoinService::new(coordinator.clone())));
        dispatcher.register(Arc::new(MakeRoomService::new(coordinator.clone())));
        dispatcher.register(Arc::new(OfferService::new(coordinator.clone())));
        dispatcher.register(Arc::new(CandidateService::new(coordinator.clone())));
        dispatcher.register(Arc::new(AnswerService::new(coordinator.clone())));
        dispatcher.register(Arc::new(PingService::new(sink.clone())));

        let (cmd_tx, cmd_rx) = mpsc::channel(16);

        let engine = Self {
            dispatcher: Arc::new(dispatcher),
            coordinator,
            liveness: LivenessMonitor::new(sink),
            metrics,
            notifier,
            login,
            commands: cmd_rx,
            transport,
            peer_events,
        };
        (engine, cmd_tx, out_rx)
    }

    pub fn coordinator(&self) -> Arc<SessionCoordinator> {
        Arc::clone(&self.coordinator)
    }

    pub fn metrics(&self) -> Arc<EngineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Drive the session until the transport closes.
    pub async fn run(mut self) -> Result<()> {
        let mut commands_open = true;
        let mut peer_open = true;

        loop {
            tokio::select! {
                maybe_cmd = self.commands.recv(), if commands_open => {
                    match maybe_cmd {
                        Some(cmd) => self.on_command(cmd).await,
                        None => commands_open = false,
                    }
                }

                maybe_ev = self.transport.next() => {
                    let Some(ev) = maybe_ev else {
                        self.coordinator.transport_closed().await;
                        break;
                    };
                    match ev {
                        TransportEvent::Connected => {
                            tracing::info!("transport connected");
                            if let Err(e) = self.liveness.on_connect().await {
                                tracing::warn!(error = %e, "initial ping failed");
                            }
                        }
                        TransportEvent::Frame(raw) => self.on_frame(&raw).await,
                        TransportEvent::Closed => {
                            self.coordinator.transport_closed().await;
                            break;
                        }
                    }
                }

                maybe_pe = self.peer_events.recv(), if peer_open => {
                    match maybe_pe {
                        Some(ev) => self.on_peer_event(ev).await,
                        None => peer_open = false,
                    }
                }
            }
        }
        Ok(())
    }

    async fn on_command(&self, cmd: Command) {
        match cmd {
            Command::Login { username, password } => {
                match self.login.login(&username, &password).await {
                    Ok(token) => {
                        if let Err(e) = self.coordinator.authenticate(token).await {
                            tracing::warn!(error = %e, "authenticate send failed");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "login failed");
                        self.notifier.failure(e.kind().as_str(), &e.to_string());
                    }
                }
            }
            Command::Call { to_user } => {
                if let Err(e) = self.coordinator.place_call(&to_user).await {
                    tracing::warn!(error = %e, "call request failed");
                }
            }
        }
    }

    /// Decode-then-dispatch. Malformed frames and handler failures are
    /// absorbed here: logged and counted, never escalated, no state change.
    async fn on_frame(&self, raw: &str) {
        self.metrics.frames_in.inc();
        match Envelope::decode(raw) {
            Ok(env) => {
                if let Err(e) = self.dispatcher.dispatch(env).await {
                    self.metrics.handler_errors.inc();
                    tracing::warn!(error = %e, kind = e.kind().as_str(), "handler failed");
                }
            }
            Err(e) => {
                self.metrics.decode_errors.inc();
                tracing::warn!(error = %e, "malformed frame dropped");
            }
        }
    }

    async fn on_peer_event(&self, ev: PeerEvent) {
        match ev {
            PeerEvent::LocalCandidate(candidate) => {
                if let Err(e) = self.coordinator.local_candidate(candidate).await {
                    tracing::warn!(error = %e, "local candidate send failed");
                }
            }
            PeerEvent::RemoteStream(stream) => {
                self.coordinator.remote_stream(stream).await;
            }
        }
    }
}
