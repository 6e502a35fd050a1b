//! probewire delivery: probe-data envelopes and listener fan-out.
//!
//! This crate wires decoded command payloads to registered observers. The
//! transport hands a decoded command to [`envelope::ProbeDataEnvelope`],
//! which the [`hub::ListenerHub`] fans out synchronously; the optional
//! [`pump::DeliveryPump`] serializes delivery through one task so listener
//! code never needs to be reentrant-safe.

pub mod envelope;
pub mod hub;
pub mod pump;

pub use envelope::{ProbeDataEnvelope, SourceId};
pub use hub::{DeliveryError, DispatchReport, ListenerHub, ListenerToken, ProbeDataListener};
pub use pump::DeliveryPump;
