//! probewire core: transport-agnostic command wire contracts and error types.
//!
//! This crate defines the versioned command envelope, per-payload-kind codecs,
//! and the type-id registry shared by the agent side, the client side, and
//! delivery tooling. It intentionally carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `WireError`/`Result` so a monitored
//! process never crashes on malformed input from the peer.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod wire;

/// Shared result type.
pub use error::{Result, WireError};
