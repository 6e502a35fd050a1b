//! Per-payload-kind codecs.
//!
//! Each payload kind implements [`WirePayload`] instead of inheriting from a
//! generic command base. Decoded payloads cross crate boundaries as
//! [`PayloadValue`], a tagged union over the known kinds; new kinds extend the
//! enum plus the command registry.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};
use serde::Serialize;

use crate::error::{Result, WireError};
use crate::wire::cursor;

/// Capability interface implemented by every concrete payload kind.
pub trait WirePayload: Sized {
    /// Serialize the payload after the command meta.
    fn encode(&self, out: &mut BytesMut) -> Result<()>;

    /// Reconstruct exactly what a matching `encode` produced, including the
    /// zero-element case. Must fail on truncation or inconsistent counts.
    fn decode(input: &mut Bytes) -> Result<Self>;
}

/// A decoded payload, detached from its command envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data")]
pub enum PayloadValue {
    /// Text-keyed, text-valued mapping (unique keys).
    StringMap(HashMap<String, String>),
}

impl PayloadValue {
    /// One-line summary for logs (never the full contents).
    pub fn summary(&self) -> String {
        match self {
            PayloadValue::StringMap(m) => format!("StringMap({} entries)", m.len()),
        }
    }
}

/// String-map payload: `Count:i32 (Key:utf Value:utf){Count}`.
///
/// Entry order on the wire is the writer's iteration order; it carries no
/// semantic weight and is not preserved across a round-trip.
impl WirePayload for HashMap<String, String> {
    fn encode(&self, out: &mut BytesMut) -> Result<()> {
        let count = i32::try_from(self.len())
            .map_err(|_| WireError::EncodeFailed(format!("string map has {} entries", self.len())))?;
        cursor::put_i32(out, count);
        for (key, value) in self {
            cursor::put_string(out, key, "string map key")?;
            cursor::put_string(out, value, "string map value")?;
        }
        Ok(())
    }

    fn decode(input: &mut Bytes) -> Result<Self> {
        let count = cursor::get_i32(input, "string map count")?;
        if count < 0 {
            return Err(WireError::MalformedStream(format!(
                "negative string map count {count}"
            )));
        }
        // Each entry costs at least two length prefixes; reject counts the
        // remaining bytes cannot possibly satisfy before allocating.
        let min_bytes = (count as usize).saturating_mul(4);
        if min_bytes > input.len() {
            return Err(WireError::MalformedStream(format!(
                "string map count {count} exceeds remaining {} bytes",
                input.len()
            )));
        }
        let mut map = HashMap::with_capacity(count as usize);
        for _ in 0..count {
            let key = cursor::get_string(input, "string map key")?;
            let value = cursor::get_string(input, "string map value")?;
            // Duplicate keys: last write wins, ordinary map semantics.
            map.insert(key, value);
        }
        Ok(map)
    }
}
