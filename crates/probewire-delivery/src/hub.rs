//! Synchronous listener fan-out.
//!
//! Policy: delivery continues past a failing listener; failures are
//! collected into the [`DispatchReport`] and logged, never propagated as a
//! panic and never allowed to starve later listeners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use probewire_core::WireError;

use crate::envelope::ProbeDataEnvelope;

/// Errors produced on the delivery side.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("listener failed: {0}")]
    Listener(String),
    #[error("delivery channel closed")]
    ChannelClosed,
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// Observer notified once per delivered envelope.
pub trait ProbeDataListener: Send + Sync {
    fn on_probe_data(&self, envelope: &ProbeDataEnvelope) -> Result<(), DeliveryError>;
}

/// Handle returned by `register`, used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

/// Outcome of one `notify` call.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Listeners that returned `Ok`.
    pub delivered: usize,
    /// Listeners that failed, in registration order.
    pub failures: Vec<(ListenerToken, DeliveryError)>,
}

impl DispatchReport {
    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Entry {
    token: ListenerToken,
    listener: Arc<dyn ProbeDataListener>,
}

/// Registry of probe-data observers with registration-ordered delivery.
#[derive(Default)]
pub struct ListenerHub {
    listeners: Mutex<Vec<Entry>>,
    next_token: AtomicU64,
}

impl ListenerHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Register an observer; it will see every envelope notified after this
    /// call, in registration order relative to other listeners.
    pub fn register(&self, listener: Arc<dyn ProbeDataListener>) -> ListenerToken {
        let token = ListenerToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.entries().push(Entry { token, listener });
        token
    }

    /// Remove a previously registered observer. Returns `false` if the
    /// token is unknown (already unregistered).
    pub fn unregister(&self, token: ListenerToken) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.token != token);
        entries.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.entries().len()
    }

    /// Deliver `envelope` to every registered listener exactly once,
    /// synchronously, in registration order.
    ///
    /// The listener list is snapshotted up front: registrations made while a
    /// notify is in flight take effect from the next notify.
    pub fn notify(&self, envelope: &ProbeDataEnvelope) -> DispatchReport {
        let snapshot: Vec<(ListenerToken, Arc<dyn ProbeDataListener>)> = self
            .entries()
            .iter()
            .map(|e| (e.token, Arc::clone(&e.listener)))
            .collect();

        let mut report = DispatchReport::default();
        for (token, listener) in snapshot {
            match listener.on_probe_data(envelope) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(source = %envelope.source(), error = %e, "listener failed");
                    report.failures.push((token, e));
                }
            }
        }
        tracing::debug!(
            source = %envelope.source(),
            delivered = report.delivered,
            failed = report.failures.len(),
            "envelope dispatched"
        );
        report
    }
}
