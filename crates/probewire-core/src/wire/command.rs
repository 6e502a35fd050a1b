//! Command envelope and lifecycle.
//!
//! A command lives for one encode or one decode. `write_command` serializes
//! the routing meta then delegates the payload to the concrete kind;
//! `read_command` does the inverse, selecting the kind through the registry.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use serde::Serialize;

use crate::error::Result;
use crate::wire::cursor;
use crate::wire::payload::{PayloadValue, WirePayload};
use crate::wire::registry::CommandRegistry;

/// Routing and type metadata carried by every command.
///
/// All three fields are fixed at construction. `rx`/`tx` are opaque endpoint
/// ids meaningful only to the routing layer; the codec round-trips them
/// exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandMeta {
    /// Stable wire identifier of the concrete payload kind.
    pub type_id: i32,
    /// Logical receiver endpoint.
    pub rx: i32,
    /// Logical sender endpoint.
    pub tx: i32,
}

impl CommandMeta {
    pub fn new(type_id: i32, rx: i32, tx: i32) -> Self {
        Self { type_id, rx, tx }
    }

    /// Serialize meta fields (three big-endian `i32`s).
    pub fn write(&self, out: &mut BytesMut) {
        cursor::put_i32(out, self.type_id);
        cursor::put_i32(out, self.rx);
        cursor::put_i32(out, self.tx);
    }

    /// Read meta fields, failing on a short buffer.
    pub fn read(input: &mut Bytes) -> Result<Self> {
        let type_id = cursor::get_i32(input, "command type id")?;
        let rx = cursor::get_i32(input, "command rx endpoint")?;
        let tx = cursor::get_i32(input, "command tx endpoint")?;
        Ok(Self { type_id, rx, tx })
    }
}

/// One wire command: meta plus an exclusively owned, possibly absent payload.
pub trait WireCommand: Send + std::fmt::Debug {
    /// Routing/type metadata fixed at construction.
    fn meta(&self) -> CommandMeta;

    /// Serialize the payload portion. An absent payload must still emit a
    /// count prefix so it is representable on the wire.
    fn encode_payload(&self, out: &mut BytesMut) -> Result<()>;

    /// Decode the payload portion into a fresh value and install it. On
    /// failure the previously held payload must remain untouched.
    fn decode_payload(&mut self, input: &mut Bytes) -> Result<()>;

    /// Detach the decoded payload for delivery, leaving the command empty.
    fn take_payload(&mut self) -> Option<PayloadValue>;
}

/// Serialize a full command (meta, then payload) to `out`.
///
/// Bytes already written when the payload fails to encode are the caller's
/// responsibility to discard.
pub fn write_command(cmd: &dyn WireCommand, out: &mut BytesMut) -> Result<()> {
    cmd.meta().write(out);
    cmd.encode_payload(out)
}

/// Decode one command from `input` using `registry` to select the kind.
///
/// Unknown type ids surface as [`WireError::UnknownType`] so an old reader
/// can report (or skip) commands from a newer protocol version instead of
/// corrupting subsequent parsing.
pub fn read_command(input: &mut Bytes, registry: &CommandRegistry) -> Result<Box<dyn WireCommand>> {
    let meta = CommandMeta::read(input)?;
    let factory = registry.resolve(meta.type_id)?;
    let mut cmd = factory(meta);
    cmd.decode_payload(input)?;
    tracing::trace!(type_id = meta.type_id, rx = meta.rx, tx = meta.tx, "decoded command");
    Ok(cmd)
}

/// Command carrying a text-to-text mapping payload.
#[derive(Debug)]
pub struct StringMapCommand {
    meta: CommandMeta,
    payload: Option<HashMap<String, String>>,
}

impl StringMapCommand {
    /// Wire type id of this kind, stable across a protocol version.
    pub const TYPE_ID: i32 = 1;

    /// Empty command, ready for `decode_payload` or `set_payload`.
    pub fn new(meta: CommandMeta) -> Self {
        Self { meta, payload: None }
    }

    pub fn with_payload(meta: CommandMeta, payload: HashMap<String, String>) -> Self {
        Self {
            meta,
            payload: Some(payload),
        }
    }

    /// Zero-argument factory registered under [`Self::TYPE_ID`].
    pub fn factory(meta: CommandMeta) -> Box<dyn WireCommand> {
        Box::new(Self::new(meta))
    }

    pub fn payload(&self) -> Option<&HashMap<String, String>> {
        self.payload.as_ref()
    }

    pub fn set_payload(&mut self, payload: Option<HashMap<String, String>>) {
        self.payload = payload;
    }
}

impl WireCommand for StringMapCommand {
    fn meta(&self) -> CommandMeta {
        self.meta
    }

    fn encode_payload(&self, out: &mut BytesMut) -> Result<()> {
        match &self.payload {
            Some(map) => map.encode(out),
            // Absent payload: count zero, indistinguishable on the wire
            // from an explicitly empty mapping.
            None => {
                cursor::put_i32(out, 0);
                Ok(())
            }
        }
    }

    fn decode_payload(&mut self, input: &mut Bytes) -> Result<()> {
        // Decode fully before installing: a truncated stream must not leave
        // a partially populated mapping visible as the payload.
        let map = HashMap::<String, String>::decode(input)?;
        self.payload = Some(map);
        Ok(())
    }

    fn take_payload(&mut self) -> Option<PayloadValue> {
        self.payload.take().map(PayloadValue::StringMap)
    }
}
