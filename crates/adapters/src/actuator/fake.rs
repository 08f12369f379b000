// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake actuator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Actuator, ActuatorError};
use ald_core::{ActuatorCommand, ActuatorId, ActuatorSet};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Recorded actuator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorCall {
    Activate(ActuatorId),
    Deactivate(ActuatorId),
}

impl ActuatorCall {
    pub fn activate(id: &str) -> Self {
        ActuatorCall::Activate(ActuatorId::from(id))
    }

    pub fn deactivate(id: &str) -> Self {
        ActuatorCall::Deactivate(ActuatorId::from(id))
    }

    pub fn id(&self) -> &ActuatorId {
        match self {
            ActuatorCall::Activate(id) | ActuatorCall::Deactivate(id) => id,
        }
    }
}

#[derive(Default)]
struct FakeState {
    calls: Vec<ActuatorCall>,
    active: ActuatorSet,
    failing: HashSet<ActuatorId>,
}

/// Fake actuator that records calls and tracks which outputs are open
#[derive(Clone, Default)]
pub struct FakeActuator {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command for `id` fail from now on
    pub fn fail_on(&self, id: &str) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.failing.insert(ActuatorId::from(id));
    }

    /// Get all recorded calls, in order
    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Actuators currently open
    pub fn active(&self) -> ActuatorSet {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .active
            .clone()
    }

    fn record(&self, id: &ActuatorId, command: ActuatorCommand) -> Result<(), ActuatorError> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(match command {
            ActuatorCommand::Activate => ActuatorCall::Activate(id.clone()),
            ActuatorCommand::Deactivate => ActuatorCall::Deactivate(id.clone()),
        });

        if state.failing.contains(id) {
            return Err(ActuatorError::CommandFailed {
                id: id.clone(),
                command,
                message: "injected failure".to_string(),
            });
        }

        match command {
            ActuatorCommand::Activate => state.active.insert(id.clone()),
            ActuatorCommand::Deactivate => state.active.remove(id),
        };
        Ok(())
    }
}

#[async_trait]
impl Actuator for FakeActuator {
    async fn activate(&self, id: &ActuatorId) -> Result<(), ActuatorError> {
        self.record(id, ActuatorCommand::Activate)
    }

    async fn deactivate(&self, id: &ActuatorId) -> Result<(), ActuatorError> {
        self.record(id, ActuatorCommand::Deactivate)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
