//! Top-level facade crate for probewire.
//!
//! Re-exports the wire core and the delivery layer so users can depend on a
//! single crate.

pub mod core {
    pub use probewire_core::*;
}

pub mod delivery {
    pub use probewire_delivery::*;
}
