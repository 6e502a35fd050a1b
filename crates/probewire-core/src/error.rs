//! Shared error type across probewire crates.

use thiserror::Error;

/// Stable error codes surfaced to transport/reporting layers (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Truncated stream or inconsistent length/count field.
    MalformedStream,
    /// Type id with no registered factory.
    UnknownType,
    /// A required field was absent after construction or decode.
    InvariantViolation,
    /// A value could not be represented on the wire.
    EncodeFailed,
}

impl ErrorCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedStream => "MALFORMED_STREAM",
            ErrorCode::UnknownType => "UNKNOWN_TYPE",
            ErrorCode::InvariantViolation => "INVARIANT_VIOLATION",
            ErrorCode::EncodeFailed => "ENCODE_FAILED",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type used by the codec, registry, and delivery layers.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed stream: {0}")]
    MalformedStream(String),
    #[error("unknown command type {0}")]
    UnknownType(i32),
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    #[error("encode failed: {0}")]
    EncodeFailed(String),
    /// Decode failure wrapping its underlying cause so the root cause
    /// remains diagnosable through the error chain.
    #[error("decode failed: {context}")]
    Decode {
        context: String,
        #[source]
        source: Box<WireError>,
    },
}

impl WireError {
    /// Map to a stable reporting code. `Decode` delegates to its cause.
    pub fn code(&self) -> ErrorCode {
        match self {
            WireError::MalformedStream(_) => ErrorCode::MalformedStream,
            WireError::UnknownType(_) => ErrorCode::UnknownType,
            WireError::InvariantViolation(_) => ErrorCode::InvariantViolation,
            WireError::EncodeFailed(_) => ErrorCode::EncodeFailed,
            WireError::Decode { source, .. } => source.code(),
        }
    }

    /// Wrap this error as the cause of a decode failure.
    pub fn in_decode(self, context: impl Into<String>) -> WireError {
        WireError::Decode {
            context: context.into(),
            source: Box::new(self),
        }
    }
}
