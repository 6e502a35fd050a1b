//! Envelope invariants and listener fan-out behavior.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::error::Error as _;
use std::sync::{Arc, Mutex};

use probewire_core::wire::{CommandMeta, PayloadValue, StringMapCommand, WireCommand};
use probewire_core::WireError;
use probewire_delivery::{
    DeliveryError, DispatchReport, ListenerHub, ProbeDataEnvelope, ProbeDataListener, SourceId,
};

fn string_map(entries: &[(&str, &str)]) -> PayloadValue {
    PayloadValue::StringMap(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// Records its name into a shared log on every delivery.
struct Recorder {
    name: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
    fail: bool,
}

impl ProbeDataListener for Recorder {
    fn on_probe_data(&self, _envelope: &ProbeDataEnvelope) -> Result<(), DeliveryError> {
        self.log.lock().unwrap().push(self.name);
        if self.fail {
            Err(DeliveryError::Listener(format!("{} refused", self.name)))
        } else {
            Ok(())
        }
    }
}

#[test]
fn envelope_requires_probe_data() {
    let err = ProbeDataEnvelope::try_new(SourceId(3), None).unwrap_err();
    assert!(matches!(err, WireError::InvariantViolation(_)));
    assert_eq!(err.code().as_str(), "INVARIANT_VIOLATION");

    let env = ProbeDataEnvelope::try_new(SourceId(3), Some(string_map(&[("a", "1")]))).unwrap();
    assert_eq!(env.source(), SourceId(3));
    assert_eq!(env.probe_data(), &string_map(&[("a", "1")]));
}

#[test]
fn decoded_envelope_wraps_missing_payload_cause() {
    // A command whose payload was never set models wire corruption.
    let mut cmd = StringMapCommand::new(CommandMeta::new(StringMapCommand::TYPE_ID, 1, 8));
    let err = ProbeDataEnvelope::from_decoded(&mut cmd).unwrap_err();

    assert!(matches!(err, WireError::Decode { .. }));
    // Root cause stays diagnosable through the chain.
    let cause = err.source().expect("decode error carries its cause");
    assert!(cause.to_string().contains("source 8"));
    assert_eq!(err.code().as_str(), "INVARIANT_VIOLATION");
}

#[test]
fn decoded_envelope_uses_tx_as_source() {
    let mut cmd = StringMapCommand::with_payload(
        CommandMeta::new(StringMapCommand::TYPE_ID, 1, 8),
        HashMap::from([("pid".to_string(), "77".to_string())]),
    );
    let env = ProbeDataEnvelope::from_decoded(&mut cmd).unwrap();
    assert_eq!(env.source(), SourceId(8));
    // Payload ownership moved into the envelope.
    assert!(cmd.take_payload().is_none());
}

#[test]
fn notify_delivers_in_registration_order_exactly_once() {
    let hub = ListenerHub::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    for name in ["first", "second", "third"] {
        hub.register(Arc::new(Recorder {
            name,
            log: Arc::clone(&log),
            fail: false,
        }));
    }

    let env = ProbeDataEnvelope::new(SourceId(1), string_map(&[("k", "v")]));
    let report = hub.notify(&env);

    assert!(report.all_delivered());
    assert_eq!(report.delivered, 3);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn notify_continues_past_failing_listener() {
    let hub = ListenerHub::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    hub.register(Arc::new(Recorder { name: "ok-1", log: Arc::clone(&log), fail: false }));
    let bad = hub.register(Arc::new(Recorder { name: "bad", log: Arc::clone(&log), fail: true }));
    hub.register(Arc::new(Recorder { name: "ok-2", log: Arc::clone(&log), fail: false }));

    let env = ProbeDataEnvelope::new(SourceId(1), string_map(&[]));
    let report: DispatchReport = hub.notify(&env);

    assert_eq!(*log.lock().unwrap(), vec!["ok-1", "bad", "ok-2"]);
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, bad);
}

#[test]
fn unregistered_listener_is_skipped() {
    let hub = ListenerHub::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let keep = Recorder { name: "keep", log: Arc::clone(&log), fail: false };
    let drop_ = Recorder { name: "drop", log: Arc::clone(&log), fail: false };
    hub.register(Arc::new(keep));
    let token = hub.register(Arc::new(drop_));

    assert!(hub.unregister(token));
    assert!(!hub.unregister(token), "double unregister reports false");
    assert_eq!(hub.listener_count(), 1);

    hub.notify(&ProbeDataEnvelope::new(SourceId(0), string_map(&[])));
    assert_eq!(*log.lock().unwrap(), vec!["keep"]);
}
