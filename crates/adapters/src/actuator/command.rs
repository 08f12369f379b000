// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell-command actuator driver
//!
//! Each actuator is switched by an operator-supplied command, run with
//! `sh -c`. `ALD_ACTUATOR` and `ALD_COMMAND` are set in its environment.

use super::{Actuator, ActuatorError};
use ald_core::{ActuatorCommand, ActuatorId, Config, Universe};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::process::Command;

#[derive(Debug, Clone, Default)]
struct Commands {
    activate: Option<String>,
    deactivate: Option<String>,
}

/// Actuator driver that runs configured shell commands
#[derive(Clone, Debug, Default)]
pub struct CommandActuator {
    commands: Arc<HashMap<ActuatorId, Commands>>,
}

impl CommandActuator {
    pub fn from_config(config: &Config) -> Self {
        let commands = config
            .actuators
            .iter()
            .map(|a| {
                (
                    a.id.clone(),
                    Commands {
                        activate: a.activate.clone(),
                        deactivate: a.deactivate.clone(),
                    },
                )
            })
            .collect();
        Self {
            commands: Arc::new(commands),
        }
    }

    /// Every actuator in `universe` must have both commands
    pub fn check(&self, universe: &Universe) -> Result<(), ActuatorError> {
        for id in universe.iter() {
            for command in [ActuatorCommand::Activate, ActuatorCommand::Deactivate] {
                self.command_line(id, command)?;
            }
        }
        Ok(())
    }

    fn command_line(&self, id: &ActuatorId, command: ActuatorCommand) -> Result<&str, ActuatorError> {
        let entry = self.commands.get(id);
        let line = match command {
            ActuatorCommand::Activate => entry.and_then(|c| c.activate.as_deref()),
            ActuatorCommand::Deactivate => entry.and_then(|c| c.deactivate.as_deref()),
        };
        line.filter(|l| !l.trim().is_empty())
            .ok_or_else(|| ActuatorError::NotConfigured {
                id: id.clone(),
                command,
            })
    }

    async fn run(&self, id: &ActuatorId, command: ActuatorCommand) -> Result<(), ActuatorError> {
        let line = self.command_line(id, command)?;
        let failed = |message: String| ActuatorError::CommandFailed {
            id: id.clone(),
            command,
            message,
        };

        let output = Command::new("sh")
            .arg("-c")
            .arg(line)
            .env("ALD_ACTUATOR", id.as_str())
            .env("ALD_COMMAND", command.to_string())
            .output()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => output.status.to_string(),
                text => text.to_string(),
            };
            return Err(failed(message));
        }

        Ok(())
    }
}

#[async_trait]
impl Actuator for CommandActuator {
    async fn activate(&self, id: &ActuatorId) -> Result<(), ActuatorError> {
        self.run(id, ActuatorCommand::Activate).await
    }

    async fn deactivate(&self, id: &ActuatorId) -> Result<(), ActuatorError> {
        self.run(id, ActuatorCommand::Deactivate).await
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
