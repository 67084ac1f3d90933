use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use sigbeam_core::error::{Result, SigbeamError};
use sigbeam_core::protocol::{Envelope, ServiceCode};

use crate::obs::EngineMetrics;

/// One handler per service code.
///
/// The dispatcher parses the inner body once and hands the generic JSON value
/// over; the handler deserializes it into its typed payload. A `null`/absent
/// body arrives as `None`.
#[async_trait]
pub trait SignalService: Send + Sync {
    fn code(&self) -> ServiceCode;
    async fn handle(&self, body: Option<Value>) -> Result<()>;
}

/// Registry and dispatcher for inbound envelopes.
///
/// Codes outside the closed set are dropped silently: deliberate forward
/// compatibility with server-sent codes this client does not yet understand.
#[derive(Default)]
pub struct Dispatcher {
    handlers: DashMap<u16, Arc<dyn SignalService>>,
    metrics: Arc<EngineMetrics>,
}

impl Dispatcher {
    pub fn new(metrics: Arc<EngineMetrics>) -> Self {
        Self {
            handlers: DashMap::new(),
            metrics,
        }
    }

    pub fn register(&self, svc: Arc<dyn SignalService>) {
        self.handlers.insert(svc.code().wire(), svc);
    }

    pub fn registered_codes(&self) -> Vec<u16> {
        self.handlers.iter().map(|e| *e.key()).collect()
    }

    pub async fn dispatch(&self, env: Envelope) -> Result<()> {
        if ServiceCode::from_wire(env.service).is_none() {
            self.metrics.unroutable.inc();
            tracing::debug!(service = env.service, "unroutable service code, dropped");
            return Ok(());
        }

        let Some(handler) = self.handlers.get(&env.service).map(|e| e.value().clone()) else {
            self.metrics.unroutable.inc();
            tracing::debug!(service = env.service, "no handler registered, dropped");
            return Ok(());
        };

        // Parse the inner body once; the handler gets the generic value.
        let body: Option<Value> = env.body_as()?;
        handler.handle(body).await
    }
}

/// Convenience for handlers: typed deserialization of the parsed body.
pub fn body_into<T: serde::de::DeserializeOwned>(body: Option<Value>) -> Result<Option<T>> {
    match body {
        None => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(|e| SigbeamError::MalformedEnvelope(format!("invalid body shape: {e}"))),
    }
}
