// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actuator interface and drivers

mod command;
mod noop;

pub use command::CommandActuator;
pub use noop::NoOpActuator;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ActuatorCall, FakeActuator};

use ald_core::{ActuatorCommand, ActuatorId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from actuator commands
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActuatorError {
    #[error("{command} {id} failed: {message}")]
    CommandFailed {
        id: ActuatorId,
        command: ActuatorCommand,
        message: String,
    },
    #[error("no {command} command configured for {id}")]
    NotConfigured {
        id: ActuatorId,
        command: ActuatorCommand,
    },
}

/// Switches binary-state outputs by id
///
/// Calls must be safe to repeat: activating an active actuator is harmless.
#[async_trait]
pub trait Actuator: Clone + Send + Sync + 'static {
    /// Open the actuator
    async fn activate(&self, id: &ActuatorId) -> Result<(), ActuatorError>;

    /// Close the actuator
    async fn deactivate(&self, id: &ActuatorId) -> Result<(), ActuatorError>;

    /// Issue `command` for `id`
    async fn apply(&self, command: ActuatorCommand, id: &ActuatorId) -> Result<(), ActuatorError> {
        match command {
            ActuatorCommand::Activate => self.activate(id).await,
            ActuatorCommand::Deactivate => self.deactivate(id).await,
        }
    }
}
