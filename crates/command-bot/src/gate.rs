//! Per-command enablement, resolved once at startup.

use crate::error::{AppError, AppResult};
use crate::registry::CommandId;
use std::collections::HashMap;
use tracing::info;

/// Read-only enablement map.
#[derive(Debug, Clone)]
pub struct CommandGate {
    enabled: HashMap<CommandId, bool>,
}

impl CommandGate {
    /// Build from the `commands` configuration section.
    ///
    /// Keys are command names, case-insensitive. A key naming no command is
    /// an error.
    pub fn new(overrides: &HashMap<String, bool>) -> AppResult<Self> {
        let mut enabled: HashMap<CommandId, bool> = CommandId::ALL
            .iter()
            .map(|id| (*id, id.info().default_enabled))
            .collect();

        for (name, value) in overrides {
            let id = CommandId::from_name(&name.to_lowercase())
                .ok_or_else(|| AppError::UnknownCommand(name.clone()))?;
            enabled.insert(id, *value);
        }

        let disabled: Vec<&str> = CommandId::ALL
            .iter()
            .filter(|id| !enabled[*id])
            .map(|id| id.name())
            .collect();
        if !disabled.is_empty() {
            info!("Disabled commands: {}", disabled.join(", "));
        }

        Ok(Self { enabled })
    }

    /// Gate with every command at its default.
    pub fn all_defaults() -> Self {
        Self {
            enabled: CommandId::ALL
                .iter()
                .map(|id| (*id, id.info().default_enabled))
                .collect(),
        }
    }

    pub fn is_enabled(&self, id: CommandId) -> bool {
        self.enabled
            .get(&id)
            .copied()
            .unwrap_or(id.info().default_enabled)
    }
}
