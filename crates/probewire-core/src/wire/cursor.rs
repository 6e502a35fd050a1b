//! Panic-free primitive readers/writers over `bytes` cursors.
//!
//! Parsing rules:
//! - Never index (`buf[0]`) — always use `Buf` and `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Read a big-endian `i32`, failing on a short buffer.
pub fn get_i32(buf: &mut Bytes, what: &str) -> Result<i32> {
    if buf.remaining() < 4 {
        return Err(WireError::MalformedStream(format!("truncated {what}")));
    }
    Ok(buf.get_i32())
}

/// Write a big-endian `i32`.
pub fn put_i32(out: &mut BytesMut, v: i32) {
    out.put_i32(v);
}

/// Read one length-prefixed UTF-8 string (`u16` BE length, then bytes).
///
/// Invalid UTF-8 is rejected as [`WireError::MalformedStream`]; the bytes are
/// never lossily converted.
pub fn get_string(buf: &mut Bytes, what: &str) -> Result<String> {
    if buf.remaining() < 2 {
        return Err(WireError::MalformedStream(format!(
            "truncated length prefix of {what}"
        )));
    }
    let len = buf.get_u16() as usize;
    if buf.remaining() < len {
        return Err(WireError::MalformedStream(format!(
            "{what} length {len} exceeds remaining {} bytes",
            buf.remaining()
        )));
    }
    let raw = buf.copy_to_bytes(len);
    String::from_utf8(raw.to_vec())
        .map_err(|e| WireError::MalformedStream(format!("{what} is not valid utf-8: {e}")))
}

/// Write one length-prefixed UTF-8 string.
///
/// Fails if the encoded form does not fit a `u16` length prefix.
pub fn put_string(out: &mut BytesMut, s: &str, what: &str) -> Result<()> {
    let bytes = s.as_bytes();
    let len = u16::try_from(bytes.len())
        .map_err(|_| WireError::EncodeFailed(format!("{what} longer than {} bytes", u16::MAX)))?;
    out.put_u16(len);
    out.put_slice(bytes);
    Ok(())
}
