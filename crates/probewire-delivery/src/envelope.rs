//! Probe-data envelope: a validated record handed to listeners.

use std::fmt;
use std::sync::Arc;

use probewire_core::wire::{PayloadValue, WireCommand};
use probewire_core::{Result, WireError};

/// Endpoint id of the producer that generated the probe data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub i32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record associating a source with probe data that is present by
/// construction: no constructor returns an envelope without a payload.
///
/// The payload is shared behind `Arc` so fan-out to many listeners never
/// clones the decoded data.
#[derive(Debug, Clone)]
pub struct ProbeDataEnvelope {
    source: SourceId,
    probe_data: Arc<PayloadValue>,
}

impl ProbeDataEnvelope {
    /// Envelope from an already-present payload. Cannot fail: presence is
    /// guaranteed by taking the payload by value.
    pub fn new(source: SourceId, probe_data: PayloadValue) -> Self {
        Self {
            source,
            probe_data: Arc::new(probe_data),
        }
    }

    /// Envelope from a possibly-absent payload, e.g. a command whose
    /// producer never set one. Absence fails immediately with
    /// [`WireError::InvariantViolation`]; no half-valid envelope escapes.
    pub fn try_new(source: SourceId, probe_data: Option<PayloadValue>) -> Result<Self> {
        let data = probe_data.ok_or_else(|| {
            WireError::InvariantViolation(format!("probe data from source {source} is absent"))
        })?;
        Ok(Self::new(source, data))
    }

    /// Envelope from a freshly decoded command, using its `tx` endpoint as
    /// the source. A missing payload here means wire corruption or a
    /// producer bug, so the invariant failure is wrapped as a decode error
    /// with its cause preserved.
    pub fn from_decoded(cmd: &mut dyn WireCommand) -> Result<Self> {
        let source = SourceId(cmd.meta().tx);
        Self::try_new(source, cmd.take_payload())
            .map_err(|e| e.in_decode("probe data envelope"))
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    /// The probe data; non-null for the lifetime of the envelope.
    pub fn probe_data(&self) -> &PayloadValue {
        &self.probe_data
    }
}

impl fmt::Display for ProbeDataEnvelope {
    /// Log-oriented rendering; exact details unspecified and subject to
    /// change.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProbeDataEnvelope[source = {}, probe_data = {}]",
            self.source,
            self.probe_data.summary()
        )
    }
}
