//! Ping/keepalive liveness.
//!
//! The server owns the cadence: the client sends one bare ping when the
//! transport comes up and from then on only echoes. There is no client-side
//! timeout; connection loss is observed through the transport's own close
//! event, never inferred here.

use async_trait::async_trait;
use serde_json::Value;

use sigbeam_core::error::Result;
use sigbeam_core::protocol::body::{PingReply, SignalResult};
use sigbeam_core::protocol::{Envelope, ServiceCode};

use crate::dispatch::{body_into, SignalService};
use crate::transport::EnvelopeSink;

pub struct LivenessMonitor {
    outbound: EnvelopeSink,
}

impl LivenessMonitor {
    pub fn new(outbound: EnvelopeSink) -> Self {
        Self { outbound }
    }

    /// First traffic after connect: the bare `{service: 99, body: null}` ping.
    pub async fn on_connect(&self) -> Result<()> {
        tracing::debug!("connected, sending initial ping");
        self.outbound.send(&Envelope::bare(ServiceCode::Ping)).await
    }
}

/// Service 99: bounce-back echo. A ping whose `r` is null (or whose body is
/// absent) gets an immediate `{body: null}` reply; a failure result is left
/// alone.
pub struct PingService {
    outbound: EnvelopeSink,
}

impl PingService {
    pub fn new(outbound: EnvelopeSink) -> Self {
        Self { outbound }
    }
}

#[async_trait]
impl SignalService for PingService {
    fn code(&self) -> ServiceCode {
        ServiceCode::Ping
    }

    async fn handle(&self, body: Option<Value>) -> Result<()> {
        let r = body_into::<SignalResult>(body)?.and_then(|res| res.r);
        if r.is_some() {
            tracing::debug!(?r, "ping carried a result code, not echoing");
            return Ok(());
        }
        self.outbound
            .send(&Envelope::encode(ServiceCode::Ping, &PingReply::new())?)
            .await
    }
}
