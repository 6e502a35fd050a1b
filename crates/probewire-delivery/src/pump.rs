//! Serialized delivery pump.
//!
//! Producers on any thread hand envelopes to the pump; a single tokio task
//! drains the queue and runs the hub's synchronous fan-out, so listeners are
//! never invoked concurrently and need not be reentrant-safe.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::envelope::ProbeDataEnvelope;
use crate::hub::{DeliveryError, ListenerHub};

/// Cloneable producer handle feeding the delivery task.
#[derive(Clone)]
pub struct DeliveryPump {
    tx: mpsc::UnboundedSender<ProbeDataEnvelope>,
}

impl DeliveryPump {
    /// Spawn the delivery task for `hub`. Dropping every `DeliveryPump`
    /// clone closes the queue and ends the task after the backlog drains.
    pub fn spawn(hub: Arc<ListenerHub>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<ProbeDataEnvelope>();
        let handle = tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                let report = hub.notify(&envelope);
                if !report.all_delivered() {
                    tracing::warn!(
                        source = %envelope.source(),
                        failed = report.failures.len(),
                        "dispatch completed with listener failures"
                    );
                }
            }
            tracing::debug!("delivery pump stopped");
        });
        (Self { tx }, handle)
    }

    /// Queue an envelope for delivery. Fails only once the delivery task has
    /// stopped.
    pub fn deliver(&self, envelope: ProbeDataEnvelope) -> Result<(), DeliveryError> {
        self.tx
            .send(envelope)
            .map_err(|_| DeliveryError::ChannelClosed)
    }
}
