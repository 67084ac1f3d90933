//! Transport boundary.
//!
//! The persistent bidirectional channel to the signaling server is an
//! external collaborator. Inbound, the engine consumes `TransportEvent`s;
//! outbound, it hands encoded frames to an mpsc queue the transport drains.

use std::sync::Arc;

use tokio::sync::mpsc;

use sigbeam_core::error::{Result, SigbeamError};
use sigbeam_core::protocol::Envelope;

use crate::obs::EngineMetrics;

/// Lifecycle and traffic events delivered by the transport implementation.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// The channel is up. Sent once, before any frame.
    Connected,
    /// One raw text frame, in delivery order.
    Frame(String),
    /// The channel is gone. Terminal; no reconnection is attempted.
    Closed,
}

/// Outbound side: encodes exactly one envelope per protocol event and queues
/// the frame for the transport.
#[derive(Clone)]
pub struct EnvelopeSink {
    tx: mpsc::Sender<String>,
    metrics: Arc<EngineMetrics>,
}

impl EnvelopeSink {
    pub fn new(tx: mpsc::Sender<String>, metrics: Arc<EngineMetrics>) -> Self {
        Self { tx, metrics }
    }

    pub async fn send(&self, env: &Envelope) -> Result<()> {
        let frame = env.to_frame()?;
        tracing::trace!(service = env.service, "envelope out");
        self.tx
            .send(frame)
            .await
            .map_err(|_| SigbeamError::Transport("outbound channel closed".into()))?;
        self.metrics.frames_out.inc();
        Ok(())
    }
}
