// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op actuator for dry runs.

use super::{Actuator, ActuatorError};
use ald_core::ActuatorId;
use async_trait::async_trait;

/// Actuator that accepts every command and touches no hardware.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpActuator;

impl NoOpActuator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Actuator for NoOpActuator {
    async fn activate(&self, _id: &ActuatorId) -> Result<(), ActuatorError> {
        Ok(())
    }

    async fn deactivate(&self, _id: &ActuatorId) -> Result<(), ActuatorError> {
        Ok(())
    }
}
