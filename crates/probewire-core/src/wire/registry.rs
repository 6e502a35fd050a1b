//! Registry mapping wire type ids to command factories.
//!
//! Lifecycle: populate once at startup, read many. Nothing enforces
//! immutability after startup, but no caller mutates a registry that is
//! already decoding a stream.

use dashmap::DashMap;

use crate::error::{Result, WireError};
use crate::wire::command::{CommandMeta, StringMapCommand, WireCommand};

/// Zero-argument factory producing an empty command of one concrete kind.
pub type CommandFactory = fn(CommandMeta) -> Box<dyn WireCommand>;

/// Maps type ids (process-wide unique, stable across a protocol version) to
/// the factory able to reconstruct the matching command.
#[derive(Default)]
pub struct CommandRegistry {
    factories: DashMap<i32, CommandFactory>,
}

impl CommandRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in command kinds.
    pub fn builtin() -> Self {
        let reg = Self::new();
        reg.register(StringMapCommand::TYPE_ID, StringMapCommand::factory);
        reg
    }

    /// Register `factory` under `type_id`, replacing any previous entry.
    pub fn register(&self, type_id: i32, factory: CommandFactory) {
        self.factories.insert(type_id, factory);
    }

    /// Resolve a factory, or [`WireError::UnknownType`] if none is
    /// registered. Never panics: an unknown id is the expected shape of a
    /// newer peer, not corruption.
    pub fn resolve(&self, type_id: i32) -> Result<CommandFactory> {
        self.factories
            .get(&type_id)
            .map(|e| *e.value())
            .ok_or(WireError::UnknownType(type_id))
    }

    pub fn registered_type_ids(&self) -> Vec<i32> {
        self.factories.iter().map(|e| *e.key()).collect()
    }
}
