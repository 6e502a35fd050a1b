//! Command wire format.
//!
//! One encoded command is `meta` (type id + routing endpoints) followed by a
//! payload whose shape is owned by the concrete command kind:
//!
//! ```text
//! Command   := TypeId:i32 Rx:i32 Tx:i32 Payload
//! StringMap := Count:i32 (Key:utf Value:utf){Count}
//! utf       := Len:u16 Byte{Len}
//! ```
//!
//! All integers are big-endian. Text is strict UTF-8; malformed byte
//! sequences are a decode error, never replacement characters.

pub mod command;
pub mod cursor;
pub mod payload;
pub mod registry;

pub use command::{read_command, write_command, CommandMeta, StringMapCommand, WireCommand};
pub use payload::{PayloadValue, WirePayload};
pub use registry::{CommandFactory, CommandRegistry};
